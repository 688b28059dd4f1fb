//! # ASCII Rendering
//!
//! One glyph per cell, one line per row.

use crate::world::{Cell, Grid};

/// Renders `grid` as text. Empty positions print as spaces.
///
/// # Examples
///
/// ```
/// use hallways::{render_ascii, Cell, Grid, TileKind};
///
/// let mut grid = Grid::new(3, 2);
/// grid.put(0, 0, Cell::new(TileKind::Room));
/// grid.put(2, 1, Cell::new(TileKind::Door));
/// assert_eq!(render_ascii(&grid), ".  \n  +");
/// ```
pub fn render_ascii(grid: &Grid<Cell>) -> String {
    let width = grid.width() as i32;
    let mut out = String::with_capacity((grid.width() as usize + 1) * grid.height() as usize);

    for y in 0..grid.height() as i32 {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..width {
            out.push(grid.get(x, y).map_or(' ', |cell| cell.kind.glyph()));
        }
    }
    out
}
