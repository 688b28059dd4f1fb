//! # World Module
//!
//! Spatial building blocks of a generated layout: coordinates, the four
//! cardinal directions, per-cell exit sets, the cell model and the grid that
//! stores cells.

pub mod cell;
pub mod grid;

pub use cell::*;
pub use grid::*;

use crate::{HallwaysError, HallwaysResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr, IntoEnumIterator};

/// Represents a 2D coordinate on the layout grid.
///
/// `x` grows to the east and `y` grows to the south.
///
/// # Examples
///
/// ```
/// use hallways::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, -4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    /// Returns the position one step away in the given direction.
    pub fn offset(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four cardinal directions.
///
/// The discriminant is the direction's ordinal; it is also the bit index used
/// by [`Exits`] and by the serialized exit mask.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// Converts a direction to a unit position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::East.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::East => Position::new(1, 0),
            Direction::South => Position::new(0, 1),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Ordinal of this direction (North = 0, clockwise).
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Rotates a quarter turn clockwise.
    pub fn cw(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Rotates a quarter turn counter-clockwise.
    pub fn ccw(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        self.cw().cw()
    }

    /// Resolves the direction pointing from `from` toward `to`.
    ///
    /// The two points must differ along exactly one axis. Identical or
    /// diagonal points have no cardinal direction and yield
    /// [`HallwaysError::AmbiguousDirection`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::{Direction, Position};
    ///
    /// let from = Position::new(4, 4);
    /// assert_eq!(Direction::from_to(from, Position::new(4, 9)).unwrap(), Direction::South);
    /// assert!(Direction::from_to(from, Position::new(5, 5)).is_err());
    /// ```
    pub fn from_to(from: Position, to: Position) -> HallwaysResult<Direction> {
        let delta = to - from;
        match (delta.x.signum(), delta.y.signum()) {
            (1, 0) => Ok(Direction::East),
            (-1, 0) => Ok(Direction::West),
            (0, -1) => Ok(Direction::North),
            (0, 1) => Ok(Direction::South),
            _ => Err(HallwaysError::AmbiguousDirection { from, to }),
        }
    }

    /// Returns all 4 directions in ordinal order.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

bitflags! {
    /// Set of open directions on a cell.
    ///
    /// Bit `i` is set iff the direction with ordinal `i` is open, which makes
    /// [`Exits::bits`] the serialized exit mask as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Exits: u8 {
        const NORTH = 1 << 0;
        const EAST = 1 << 1;
        const SOUTH = 1 << 2;
        const WEST = 1 << 3;
    }
}

impl Exits {
    /// Iterates the open directions in ordinal order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::iter().filter(move |&direction| self.contains(direction.into()))
    }

    /// Checks whether a single direction is open.
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.into())
    }
}

impl From<Direction> for Exits {
    fn from(direction: Direction) -> Self {
        Exits::from_bits_retain(1 << direction.ordinal())
    }
}

impl FromIterator<Direction> for Exits {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Exits::empty(), |exits, direction| exits | direction.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
        assert_eq!(pos2.manhattan_distance(pos1), 7);
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
        assert_eq!(pos1.offset(Direction::West), Position::new(4, 10));
    }

    #[test]
    fn test_direction_rotation_cycle() {
        assert_eq!(Direction::North.cw(), Direction::East);
        assert_eq!(Direction::East.cw(), Direction::South);
        assert_eq!(Direction::South.cw(), Direction::West);
        assert_eq!(Direction::West.cw(), Direction::North);
        assert_eq!(Direction::North.ccw(), Direction::West);
        assert_eq!(Direction::North.opposite(), Direction::South);
    }

    #[test]
    fn test_from_to_cardinal() {
        let from = Position::new(5, 5);
        assert_eq!(Direction::from_to(from, Position::new(5, 4)).unwrap(), Direction::North);
        assert_eq!(Direction::from_to(from, Position::new(9, 5)).unwrap(), Direction::East);
        assert_eq!(Direction::from_to(from, Position::new(5, 6)).unwrap(), Direction::South);
        assert_eq!(Direction::from_to(from, Position::new(0, 5)).unwrap(), Direction::West);
    }

    #[test]
    fn test_from_to_degenerate_is_error() {
        let from = Position::new(5, 5);
        assert!(matches!(
            Direction::from_to(from, from),
            Err(HallwaysError::AmbiguousDirection { .. })
        ));
        assert!(Direction::from_to(from, Position::new(6, 6)).is_err());
    }

    #[test]
    fn test_exits_bits_follow_ordinals() {
        for direction in Direction::all() {
            assert_eq!(Exits::from(direction).bits(), 1 << direction.ordinal());
        }
        let exits: Exits = [Direction::North, Direction::West].into_iter().collect();
        assert_eq!(exits.bits(), 0b1001);
        assert_eq!(
            exits.directions().collect::<Vec<_>>(),
            vec![Direction::North, Direction::West]
        );
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        (0u8..4).prop_map(|ordinal| Direction::from_repr(ordinal).unwrap())
    }

    proptest! {
        #[test]
        fn prop_four_quarter_turns_is_identity(d in any_direction()) {
            prop_assert_eq!(d.cw().cw().cw().cw(), d);
            prop_assert_eq!(d.ccw().ccw().ccw().ccw(), d);
        }

        #[test]
        fn prop_half_turn_is_opposite(d in any_direction()) {
            prop_assert_eq!(d.cw().cw(), d.ccw().ccw());
            prop_assert_eq!(d.opposite().to_delta(), Position::origin() - d.to_delta());
        }

        #[test]
        fn prop_from_to_recovers_direction(d in any_direction(), x in -50i32..50, y in -50i32..50, len in 1i32..20) {
            let from = Position::new(x, y);
            let delta = d.to_delta();
            let to = Position::new(x + delta.x * len, y + delta.y * len);
            prop_assert_eq!(Direction::from_to(from, to).unwrap(), d);
        }
    }
}
