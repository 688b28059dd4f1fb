//! # Grid Container
//!
//! Dense, fixed-size 2D storage of optional values addressed by `(x, y)`.

use super::Position;
use crate::serialization::JsonTag;

/// Largest width or height a grid may have.
pub const MAX_DIMENSION: u32 = 65534;

/// A dense row-major grid of optional cells.
///
/// Every coordinate outside `[0, width) x [0, height)` is treated as empty:
/// reads return `None` and writes are silently dropped. Code carving near the
/// border must not assume a write landed.
///
/// # Examples
///
/// ```
/// use hallways::Grid;
///
/// let mut grid: Grid<u8> = Grid::new(4, 3);
/// *grid.get_or_create(1, 2, || 0) += 7;
/// assert_eq!(grid.get(1, 2), Some(&7));
///
/// // Out of bounds: the factory value is handed back but never stored
/// *grid.get_or_create(9, 9, || 0) += 1;
/// assert_eq!(grid.get(9, 9), None);
/// ```
#[derive(Debug, Clone)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<Option<T>>,
    /// Receives out-of-bounds `get_or_create` results
    discard: Option<T>,
    tag: Option<JsonTag>,
}

impl<T> Grid<T> {
    /// Creates an empty grid. Dimensions are clamped to `[1, 65534]`.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.clamp(1, MAX_DIMENSION);
        let height = height.clamp(1, MAX_DIMENSION);
        Self {
            width,
            height,
            cells: Self::empty_cells(width, height),
            discard: None,
            tag: None,
        }
    }

    fn empty_cells(width: u32, height: u32) -> Vec<Option<T>> {
        (0..width as usize * height as usize).map(|_| None).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Removes every stored cell. The tag is kept.
    pub fn clear(&mut self) {
        self.cells = Self::empty_cells(self.width, self.height);
        self.discard = None;
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Returns the stored cell, or `None` if empty or out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.index(x, y).and_then(|i| self.cells[i].as_ref())
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        match self.index(x, y) {
            Some(i) => self.cells[i].as_mut(),
            None => None,
        }
    }

    /// Returns the cell at `(x, y)`, creating it with `factory` if empty.
    ///
    /// Out of bounds, `factory` is still invoked and its result returned, but
    /// it is not stored: mutations to it are lost on the next call.
    pub fn get_or_create(&mut self, x: i32, y: i32, factory: impl FnOnce() -> T) -> &mut T {
        match self.index(x, y) {
            Some(i) => self.cells[i].get_or_insert_with(factory),
            None => self.discard.insert(factory()),
        }
    }

    /// Overwrites the cell at `(x, y)` and returns whatever was there.
    ///
    /// Out of bounds this is a no-op returning `None`.
    pub fn put(&mut self, x: i32, y: i32, value: T) -> Option<T> {
        let i = self.index(x, y)?;
        self.cells[i].replace(value)
    }

    /// Visits each cell of the `width x height` rectangle at `(x, y)` exactly
    /// once, row-major, passing absolute coordinates.
    pub fn visit_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        mut visit: impl FnMut(&mut Self, i32, i32),
    ) {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                visit(self, x + dx, y + dy);
            }
        }
    }

    /// Walks an approximate straight line from `(x1, y1)` toward `(x2, y2)`.
    ///
    /// Takes `max(|dx|, |dy|)` unit steps from the centre of the start cell,
    /// so it normally stops one cell short of `(x2, y2)` and may revisit a
    /// cell on shallow diagonals. Sample points are truncated toward zero,
    /// so left of or above the origin they land one cell toward it.
    /// Corridor carving uses its own exact walk.
    pub fn visit_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        mut visit: impl FnMut(&mut Self, i32, i32),
    ) {
        let dx = (x2 - x1) as f32;
        let dy = (y2 - y1) as f32;
        let scale = dx.abs().max(dy.abs());
        if scale == 0.0 {
            return;
        }

        let x_step = dx / scale;
        let y_step = dy / scale;
        let mut cur_x = x1 as f32 + 0.5;
        let mut cur_y = y1 as f32 + 0.5;
        for _ in 0..scale as u32 {
            visit(self, cur_x as i32, cur_y as i32);
            cur_x += x_step;
            cur_y += y_step;
        }
    }

    /// All in-bounds coordinates in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Number of stored cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    pub fn tag(&self) -> Option<&JsonTag> {
        self.tag.as_ref()
    }

    pub fn set_tag(&mut self, tag: Option<JsonTag>) {
        self.tag = tag;
    }
}

impl<T: PartialEq> PartialEq for Grid<T> {
    /// Compares dimensions, stored cells and tag.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.cells == other.cells
            && self.tag == other.tag
    }
}
