//! # Reachability
//!
//! Flood queries that follow open exits between carved cells.

use crate::world::{Cell, Grid, Position, TileKind};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Neighbours of `pos` that an open exit leads into.
///
/// Void cells and missing cells are never entered, so a dangling exit does
/// not extend the reachable set.
pub fn open_neighbours(grid: &Grid<Cell>, pos: Position) -> Vec<Position> {
    let Some(cell) = grid.get(pos.x, pos.y) else {
        return Vec::new();
    };
    cell.exits
        .directions()
        .map(|direction| pos.offset(direction))
        .filter(|next| {
            grid.get(next.x, next.y)
                .is_some_and(|neighbour| neighbour.kind != TileKind::OutOfBounds)
        })
        .collect()
}

/// Every position reachable from `start` by walking through open exits,
/// including `start` itself when it holds a carved cell.
///
/// # Examples
///
/// ```
/// use hallways::{reachable_from, Cell, Direction, Grid, Position, TileKind};
///
/// let mut grid = Grid::new(3, 1);
/// let mut left = Cell::new(TileKind::Room);
/// left.open_exit(Direction::East);
/// let mut right = Cell::new(TileKind::Room);
/// right.open_exit(Direction::West);
/// grid.put(0, 0, left);
/// grid.put(1, 0, right);
///
/// assert_eq!(reachable_from(&grid, Position::new(0, 0)).len(), 2);
/// ```
pub fn reachable_from(grid: &Grid<Cell>, start: Position) -> HashSet<Position> {
    match grid.get(start.x, start.y) {
        Some(cell) if cell.kind != TileKind::OutOfBounds => {
            bfs_reach(start, |&pos| open_neighbours(grid, pos)).collect()
        }
        _ => HashSet::new(),
    }
}
