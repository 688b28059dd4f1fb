//! # Generation Module
//!
//! Procedural layout generation: configuration, the records a generator
//! produces, and the [`Generator`] trait.
//!
//! The only generator today is [`HallwayGenerator`], which partitions the
//! field into a coarse lattice, drops one room into each lattice cell and
//! links the rooms with elbow-shaped hallways.

pub mod corridor;
pub mod hallway;

pub use corridor::*;
pub use hallway::*;

use crate::config::DEFAULT_PALETTE;
use crate::world::{Cell, Grid, Position};
use crate::{HallwaysError, HallwaysResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for layout generation.
///
/// Room sizes are a half-open range: rooms are at least `min_room_size` and
/// strictly less than `max_room_size` cells along each axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Width and height of the square field
    pub field_size: u32,
    /// Minimum room edge length (inclusive)
    pub min_room_size: u32,
    /// Maximum room edge length (exclusive)
    pub max_room_size: u32,
    /// Palette names assigned to rooms; empty means the default palette
    pub palettes: Vec<String>,
    /// Nominal entrance point
    pub entrance: Position,
    /// Nominal exit point
    pub exit: Position,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.max_room_size > config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            field_size: crate::config::DEFAULT_FIELD_SIZE,
            min_room_size: 3,
            max_room_size: 7,
            palettes: Vec::new(),
            entrance: Position::origin(),
            exit: Position::origin(),
        }
    }

    /// Creates a configuration for testing with a smaller field.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            field_size: 48,
            max_room_size: 6,
            ..Self::new(seed)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_field_size(mut self, field_size: u32) -> Self {
        self.field_size = field_size;
        self
    }

    /// Sets the room size range `[min, max)`.
    pub fn with_room_size(mut self, min: u32, max: u32) -> Self {
        self.min_room_size = min;
        self.max_room_size = max;
        self
    }

    /// Replaces the palette list, dropping duplicates but keeping order.
    pub fn with_palettes<I, S>(mut self, palettes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palettes.clear();
        for palette in palettes {
            let palette = palette.into();
            if !self.palettes.contains(&palette) {
                self.palettes.push(palette);
            }
        }
        self
    }

    pub fn with_entrance(mut self, x: i32, y: i32) -> Self {
        self.entrance = Position::new(x, y);
        self
    }

    pub fn with_exit(mut self, x: i32, y: i32) -> Self {
        self.exit = Position::new(x, y);
        self
    }

    /// Palettes to draw from, falling back to the default palette.
    pub fn resolved_palettes(&self) -> Vec<String> {
        if self.palettes.is_empty() {
            vec![DEFAULT_PALETTE.to_string()]
        } else {
            self.palettes.clone()
        }
    }

    /// Rejects configurations that cannot produce a meaningful field.
    pub fn validate(&self) -> HallwaysResult<()> {
        if self.min_room_size == 0 {
            return Err(HallwaysError::InvalidConfig(
                "minimum room size must be positive".to_string(),
            ));
        }
        if self.max_room_size <= self.min_room_size {
            return Err(HallwaysError::InvalidConfig(format!(
                "maximum room size {} must exceed minimum room size {}",
                self.max_room_size, self.min_room_size
            )));
        }
        if self.field_size == 0 || self.field_size > crate::world::MAX_DIMENSION {
            return Err(HallwaysError::InvalidConfig(format!(
                "field size {} outside [1, {}]",
                self.field_size,
                crate::world::MAX_DIMENSION
            )));
        }
        if self.field_size < self.max_room_size + 2 {
            return Err(HallwaysError::InvalidConfig(format!(
                "field size {} cannot hold a lattice cell for rooms below {}",
                self.field_size, self.max_room_size
            )));
        }
        if self.palettes.iter().any(|palette| palette.is_empty()) {
            return Err(HallwaysError::InvalidConfig(
                "palette names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// A rectangular room placed in the layout.
///
/// Rooms only describe where cells were carved; the cells themselves live in
/// the layout's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room within [`Layout::rooms`]
    pub id: usize,
    /// Palette the room was carved with
    pub palette: String,
    /// Top-left corner of the room
    pub top_left: Position,
    pub width: u32,
    pub height: u32,
    /// Rooms joined to this one by a hallway
    pub connections: Vec<usize>,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::{Room, Position};
    ///
    /// let room = Room::new(1, "clean", Position::new(5, 5), 4, 3);
    /// assert_eq!(room.center(), Position::new(7, 6));
    /// assert!(room.contains(Position::new(8, 7)));
    /// assert!(!room.contains(Position::new(9, 7)));
    /// ```
    pub fn new(
        id: usize,
        palette: impl Into<String>,
        top_left: Position,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id,
            palette: palette.into(),
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room, rounded toward the origin.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room overlaps with another room.
    pub fn overlaps(&self, other: &Room) -> bool {
        !(self.top_left.x >= other.top_left.x + other.width as i32
            || other.top_left.x >= self.top_left.x + self.width as i32
            || self.top_left.y >= other.top_left.y + other.height as i32
            || other.top_left.y >= self.top_left.y + self.height as i32)
    }

    /// Manhattan distance between the two rooms' top-left corners.
    pub fn origin_distance(&self, other: &Room) -> u32 {
        self.top_left.manhattan_distance(other.top_left)
    }

    /// Gets all positions within this room, row-major.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);
        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }

    /// Adds a connection to another room.
    pub fn add_connection(&mut self, room_id: usize) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// A carved hallway between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
    /// Room the hallway starts from, and the room it reaches
    pub rooms: (usize, usize),
    /// Door cells next to each room, in the same order as `rooms`
    pub doors: (Position, Position),
    /// The single bend of the elbow path
    pub bend: Position,
}

impl Hall {
    /// Returns the room on the other side of this hall.
    pub fn room_from(&self, origin: usize) -> usize {
        if self.rooms.0 == origin {
            self.rooms.1
        } else {
            self.rooms.0
        }
    }

    /// Returns the door at the other end of this hall.
    pub fn door_from(&self, origin: Position) -> Position {
        if self.doors.0 == origin {
            self.doors.1
        } else {
            self.doors.0
        }
    }
}

/// A generated layout: the populated grid plus what was placed in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub grid: Grid<Cell>,
    pub rooms: Vec<Room>,
    pub halls: Vec<Hall>,
    /// Resolved nominal entrance point
    pub entrance: Position,
    /// Resolved nominal exit point
    pub exit: Position,
    /// Edge length of one coarse lattice cell
    pub cell_size: u32,
    /// Lattice cells along each axis
    pub cells_across: u32,
    /// Room the connected set was grown from
    pub seed_room: usize,
    /// Rooms never joined to the connected set
    pub disconnected: Vec<usize>,
    /// Spanning-connection iterations spent
    pub iterations: u32,
}

impl Layout {
    /// Discards the bookkeeping and returns the bare grid.
    pub fn into_grid(self) -> Grid<Cell> {
        self.grid
    }

    /// Finds the room covering `pos`.
    pub fn room_at(&self, pos: Position) -> Option<usize> {
        self.rooms.iter().position(|room| room.contains(pos))
    }

    /// Rooms reachable from room `from` by following open exits, sorted by id.
    pub fn reachable_rooms(&self, from: usize) -> Vec<usize> {
        let Some(start) = self.rooms.get(from) else {
            return Vec::new();
        };
        let reached = crate::utils::reachable_from(&self.grid, start.top_left);
        self.rooms
            .iter()
            .filter(|room| reached.contains(&room.top_left))
            .map(|room| room.id)
            .collect()
    }

    pub fn is_fully_connected(&self) -> bool {
        self.disconnected.is_empty()
    }

    /// Number of door cells in the grid.
    pub fn door_count(&self) -> usize {
        self.grid
            .positions()
            .filter(|p| {
                self.grid
                    .get(p.x, p.y)
                    .is_some_and(|cell| cell.kind == crate::world::TileKind::Door)
            })
            .count()
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HallwaysResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> HallwaysResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;

    /// Generates content with a fresh rng seeded from `config.seed`.
    fn generate_from_config(&self, config: &GenerationConfig) -> HallwaysResult<T> {
        let mut rng = utils::create_rng(config);
        self.generate(config, &mut rng)
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::world::{Direction, TileKind};

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Picks the coarse lattice cell size for a field.
    ///
    /// Starts at `max_room_size + 2` and searches upward (below twice the
    /// start) for the smallest size that tiles the field, accepting a growing
    /// remainder until one fits.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::generation::utils::coarse_cell_size;
    ///
    /// assert_eq!(coarse_cell_size(128, 6), 8);
    /// assert_eq!(coarse_cell_size(64, 7), 16);
    /// ```
    pub fn coarse_cell_size(field_size: u32, max_room_size: u32) -> u32 {
        let initial = max_room_size + 2;
        let mut cell_size = initial;
        for tolerance in 0..initial {
            cell_size = initial;
            while field_size % cell_size > tolerance && cell_size < initial * 2 {
                cell_size += 1;
            }
            if field_size % cell_size <= tolerance {
                break;
            }
        }
        cell_size
    }

    /// Checks if two rooms are close enough to be joined by a hallway.
    pub fn rooms_within(room1: &Room, room2: &Room, max_distance: u32) -> bool {
        room1.origin_distance(room2) < max_distance
    }

    /// Validates that every open exit in the grid leads to a carved cell that
    /// opens back.
    pub fn validate_grid(grid: &Grid<Cell>) -> HallwaysResult<()> {
        for pos in grid.positions() {
            let Some(cell) = grid.get(pos.x, pos.y) else {
                continue;
            };
            if cell.kind == TileKind::OutOfBounds {
                continue;
            }
            for direction in cell.exits.directions() {
                let target = pos.offset(direction);
                match grid.get(target.x, target.y) {
                    Some(neighbour) if neighbour.kind != TileKind::OutOfBounds => {
                        if !neighbour.has_exit(direction.opposite()) {
                            return Err(HallwaysError::InvalidLayout(format!(
                                "exit {:?} from {} is not reciprocated",
                                direction, pos
                            )));
                        }
                    }
                    _ => {
                        return Err(HallwaysError::InvalidLayout(format!(
                            "exit {:?} from {} leads into the void",
                            direction, pos
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Directions pointing out of `room` from each border side `pos` lies
    /// on. Empty for interior positions; corners yield two.
    pub fn outward_sides(room: &Room, pos: Position) -> Vec<Direction> {
        let bottom_right = room.bottom_right();
        let mut sides = Vec::new();
        if pos.y == room.top_left.y {
            sides.push(Direction::North);
        }
        if pos.x == bottom_right.x {
            sides.push(Direction::East);
        }
        if pos.y == bottom_right.y {
            sides.push(Direction::South);
        }
        if pos.x == room.top_left.x {
            sides.push(Direction::West);
        }
        sides
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Direction;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(config.min_room_size >= 1);
        assert!(config.max_room_size > config.min_room_size);
        assert_eq!(config.resolved_palettes(), vec!["normal".to_string()]);
    }

    #[test]
    fn test_config_builder() {
        let config = GenerationConfig::new(1)
            .with_seed(9)
            .with_field_size(128)
            .with_room_size(3, 6)
            .with_palettes(["clean", "rough", "clean"])
            .with_entrance(0, 4)
            .with_exit(63, 59);

        assert_eq!(config.seed, 9);
        assert_eq!(config.field_size, 128);
        assert_eq!((config.min_room_size, config.max_room_size), (3, 6));
        assert_eq!(config.palettes, vec!["clean".to_string(), "rough".to_string()]);
        assert_eq!(config.entrance, Position::new(0, 4));
        assert_eq!(config.exit, Position::new(63, 59));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_bounds() {
        let invalid = [
            GenerationConfig::new(1).with_room_size(0, 4),
            GenerationConfig::new(1).with_room_size(5, 5),
            GenerationConfig::new(1).with_room_size(6, 3),
            GenerationConfig::new(1).with_field_size(0),
            GenerationConfig::new(1).with_field_size(70_000),
            GenerationConfig::new(1).with_room_size(3, 10).with_field_size(11),
            GenerationConfig::new(1).with_palettes(["clean", ""]),
        ];
        for config in invalid {
            assert!(
                matches!(config.validate(), Err(HallwaysError::InvalidConfig(_))),
                "expected {:?} to be rejected",
                config
            );
        }
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = GenerationConfig::for_testing(77).with_palettes(["clean"]);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GenerationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, "clean", Position::new(5, 5), 10, 8);

        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.center(), Position::new(10, 9));
        assert_eq!(room.area(), 80);

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));

        assert_eq!(room.all_positions().len(), 80);
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(1, "a", Position::new(5, 5), 10, 8);
        let room2 = Room::new(2, "a", Position::new(10, 8), 6, 6);
        let room3 = Room::new(3, "a", Position::new(20, 20), 5, 5);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
    }

    #[test]
    fn test_room_connections() {
        let mut room = Room::new(1, "a", Position::new(5, 5), 4, 4);
        room.add_connection(2);
        room.add_connection(3);
        room.add_connection(2);
        assert_eq!(room.connections, vec![2, 3]);
    }

    #[test]
    fn test_hall_other_side() {
        let hall = Hall {
            rooms: (4, 9),
            doors: (Position::new(1, 1), Position::new(5, 3)),
            bend: Position::new(1, 3),
        };
        assert_eq!(hall.room_from(4), 9);
        assert_eq!(hall.room_from(9), 4);
        assert_eq!(hall.door_from(Position::new(5, 3)), Position::new(1, 1));
    }

    #[test]
    fn test_coarse_cell_size() {
        assert_eq!(utils::coarse_cell_size(128, 6), 8);
        assert_eq!(utils::coarse_cell_size(48, 6), 8);
        // 100 = 10 * 10 and 10 is the first exact fit above 9
        assert_eq!(utils::coarse_cell_size(100, 7), 10);
        // Never leaves the [start, 2 * start] window
        let size = utils::coarse_cell_size(97, 7);
        assert!((9..=18).contains(&size));
    }

    #[test]
    fn test_utils_room_distance() {
        let room1 = Room::new(1, "a", Position::new(5, 5), 5, 5);
        let room2 = Room::new(2, "a", Position::new(12, 5), 5, 5);
        let room3 = Room::new(3, "a", Position::new(50, 50), 5, 5);

        assert!(utils::rooms_within(&room1, &room2, 16));
        assert!(!utils::rooms_within(&room1, &room3, 16));
    }

    #[test]
    fn test_outward_sides() {
        let room = Room::new(0, "a", Position::new(2, 2), 3, 3);
        assert_eq!(
            utils::outward_sides(&room, Position::new(2, 2)),
            vec![Direction::North, Direction::West]
        );
        assert_eq!(utils::outward_sides(&room, Position::new(3, 4)), vec![Direction::South]);
        assert!(utils::outward_sides(&room, Position::new(3, 3)).is_empty());
    }

    #[test]
    fn test_validate_grid_flags_dangling_exit() {
        use crate::world::TileKind;

        let mut grid: Grid<Cell> = Grid::new(4, 4);
        let mut cell = Cell::new(TileKind::Hallway);
        cell.open_exit(Direction::East);
        grid.put(1, 1, cell);
        assert!(matches!(
            utils::validate_grid(&grid),
            Err(HallwaysError::InvalidLayout(_))
        ));

        let mut neighbour = Cell::new(TileKind::Hallway);
        neighbour.open_exit(Direction::West);
        grid.put(2, 1, neighbour);
        assert!(utils::validate_grid(&grid).is_ok());
    }
}
