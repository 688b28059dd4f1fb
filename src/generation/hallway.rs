//! # Hallway Generation
//!
//! Lattice-seeded room placement joined by elbow hallways.
//!
//! The generator works in six steps:
//! 1. Resolve the nominal entrance and exit
//! 2. Pick a coarse lattice cell size that tiles the field
//! 3. Place and carve one random room per lattice cell
//! 4. Connect a random seed room to a nearby room
//! 5. Grow the connected set until every room joins or the budget runs out
//! 6. Prune exits that point at nothing

use super::corridor::{try_connect_rooms, ElbowPath};
use super::{utils, GenerationConfig, Generator, Hall, Layout, Room};
use crate::config::{MAX_CONNECT_ITERATIONS, MAX_SEED_ATTEMPTS};
use crate::serialization::{JsonTag, TagCompound};
use crate::world::{Cell, Direction, Exits, Grid, Position, TileKind};
use crate::{HallwaysError, HallwaysResult};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generator producing room-and-hallway layouts.
#[derive(Debug, Clone)]
pub struct HallwayGenerator {
    /// Budget for growing the connected set
    pub max_connect_iterations: u32,
    /// Attempts to link the seed room before generation fails
    pub max_seed_attempts: u32,
}

/// Working lists of which rooms are reachable from the seed room.
#[derive(Debug, Default)]
struct Connectivity {
    connected: Vec<usize>,
    disconnected: Vec<usize>,
}

impl Connectivity {
    fn new(room_count: usize) -> Self {
        Self {
            connected: Vec::with_capacity(room_count),
            disconnected: (0..room_count).collect(),
        }
    }

    fn mark_connected(&mut self, room: usize) {
        if let Some(i) = self.disconnected.iter().position(|&r| r == room) {
            self.disconnected.swap_remove(i);
        }
        if !self.connected.contains(&room) {
            self.connected.push(room);
        }
    }
}

impl HallwayGenerator {
    /// Creates a generator with the standard search budgets.
    ///
    /// # Examples
    ///
    /// ```
    /// use hallways::HallwayGenerator;
    ///
    /// let generator = HallwayGenerator::new();
    /// assert_eq!(generator.max_connect_iterations, 3000);
    /// ```
    pub fn new() -> Self {
        Self {
            max_connect_iterations: MAX_CONNECT_ITERATIONS,
            max_seed_attempts: MAX_SEED_ATTEMPTS,
        }
    }

    /// Uses the configured points, or when they coincide picks two edge
    /// midpoints independently (they may coincide too).
    fn resolve_entrance_exit(
        &self,
        config: &GenerationConfig,
        grid: &Grid<Cell>,
        rng: &mut StdRng,
    ) -> (Position, Position) {
        if config.entrance != config.exit {
            return (config.entrance, config.exit);
        }

        let width = grid.width() as i32;
        let height = grid.height() as i32;
        let center_x = width / 2;
        let center_y = height / 2;
        let sides = [
            Position::new(center_x, 0),
            Position::new(0, center_y),
            Position::new(center_x, height - 1),
            Position::new(width - 1, center_y),
        ];
        let entrance = sides[rng.gen_range(0..sides.len())];
        let exit = sides[rng.gen_range(0..sides.len())];
        (entrance, exit)
    }

    /// Samples one room per lattice cell, row-major.
    fn place_rooms(
        &self,
        config: &GenerationConfig,
        palettes: &[String],
        cell_size: u32,
        cells_across: u32,
        rng: &mut StdRng,
    ) -> Vec<Room> {
        let mut rooms = Vec::with_capacity((cells_across * cells_across) as usize);

        for cell_y in 0..cells_across {
            for cell_x in 0..cells_across {
                let width = rng.gen_range(config.min_room_size..config.max_room_size);
                let height = rng.gen_range(config.min_room_size..config.max_room_size);
                // At least one free cell on every side of the room
                let wiggle_x = cell_size - 2 - width;
                let room_x = rng.gen_range(0..wiggle_x) + 1;
                let wiggle_y = cell_size - 2 - height;
                let room_y = rng.gen_range(0..wiggle_y) + 1;
                let palette = if palettes.len() > 1 {
                    &palettes[rng.gen_range(0..palettes.len())]
                } else {
                    &palettes[0]
                };

                let top_left = Position::new(
                    (room_x + cell_x * cell_size) as i32,
                    (room_y + cell_y * cell_size) as i32,
                );
                rooms.push(Room::new(rooms.len(), palette.as_str(), top_left, width, height));
            }
        }

        rooms
    }

    /// Carves a room: every cell open on all sides except across the border.
    fn plot_room(&self, grid: &mut Grid<Cell>, room: &Room) {
        let top_left = room.top_left;
        let bottom_right = room.bottom_right();

        grid.visit_rect(top_left.x, top_left.y, room.width, room.height, |grid, x, y| {
            let cell = grid.get_or_create(x, y, Cell::default);
            cell.exits = Exits::all();
            if x == top_left.x {
                cell.close_exit(Direction::West);
            }
            if x == bottom_right.x {
                cell.close_exit(Direction::East);
            }
            if y == top_left.y {
                cell.close_exit(Direction::North);
            }
            if y == bottom_right.y {
                cell.close_exit(Direction::South);
            }
            cell.palette = Some(room.palette.clone());
            cell.kind = TileKind::Room;
        });
    }

    /// Picks a random room among `candidates` close enough to `room`.
    fn try_make_pair(
        &self,
        rooms: &[Room],
        cell_size: u32,
        room: usize,
        candidates: &[usize],
        rng: &mut StdRng,
    ) -> Option<usize> {
        let close_enough: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&other| utils::rooms_within(&rooms[room], &rooms[other], cell_size * 2))
            .collect();
        close_enough.choose(rng).copied()
    }

    /// Shuffles both lists, then returns the first disconnected room (in the
    /// new order) that has a connected room in range, paired with one of
    /// those in-range rooms.
    fn find_room_pair(
        &self,
        rooms: &[Room],
        cell_size: u32,
        state: &mut Connectivity,
        rng: &mut StdRng,
    ) -> Option<(usize, usize)> {
        state.connected.shuffle(rng);
        state.disconnected.shuffle(rng);

        for &room in &state.disconnected {
            if let Some(other) = self.try_make_pair(rooms, cell_size, room, &state.connected, rng) {
                return Some((room, other));
            }
        }
        None
    }

    /// Links the seed room to some nearby room, or fails generation.
    fn connect_seed(
        &self,
        grid: &mut Grid<Cell>,
        rooms: &[Room],
        cell_size: u32,
        seed_room: usize,
        state: &Connectivity,
        rng: &mut StdRng,
    ) -> HallwaysResult<Hall> {
        for attempt in 1..=self.max_seed_attempts {
            let Some(other) =
                self.try_make_pair(rooms, cell_size, seed_room, &state.disconnected, rng)
            else {
                trace!("Seed attempt {}: no room in range of room {}", attempt, seed_room);
                continue;
            };
            if let Some(path) = try_connect_rooms(grid, &rooms[seed_room], &rooms[other], rng) {
                debug!("Seed room {} connected to room {}", seed_room, other);
                return Ok(hall_for(seed_room, other, &path));
            }
            trace!("Seed attempt {}: hallway to room {} blocked", attempt, other);
        }

        Err(HallwaysError::GenerationFailed(format!(
            "could not connect seed room {} in {} attempts",
            seed_room, self.max_seed_attempts
        )))
    }

    /// Grows the connected set; returns the iterations spent.
    fn connect_remaining(
        &self,
        grid: &mut Grid<Cell>,
        rooms: &[Room],
        cell_size: u32,
        state: &mut Connectivity,
        halls: &mut Vec<Hall>,
        rng: &mut StdRng,
    ) -> u32 {
        let mut iterations = 0;
        while iterations < self.max_connect_iterations && !state.disconnected.is_empty() {
            iterations += 1;

            let Some((room, other)) = self.find_room_pair(rooms, cell_size, state, rng) else {
                warn!(
                    "No disconnected room has a connected room in range; {} rooms left out",
                    state.disconnected.len()
                );
                break;
            };

            match try_connect_rooms(grid, &rooms[room], &rooms[other], rng) {
                Some(path) => {
                    debug!("Room {} connected to room {}", room, other);
                    state.mark_connected(room);
                    state.mark_connected(other);
                    halls.push(hall_for(room, other, &path));
                }
                None => trace!("Hallway from room {} to room {} blocked", room, other),
            }
        }

        if !state.disconnected.is_empty() && iterations >= self.max_connect_iterations {
            warn!(
                "Connection budget of {} iterations exhausted with {} rooms disconnected",
                self.max_connect_iterations,
                state.disconnected.len()
            );
        }
        iterations
    }

    /// Removes exits that point at absent or void neighbours; returns how
    /// many were removed.
    fn prune_exits(&self, grid: &mut Grid<Cell>) -> u32 {
        let mut pruned = 0;
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let Some(cell) = grid.get(x, y) else {
                    continue;
                };
                if cell.kind == TileKind::OutOfBounds {
                    continue;
                }

                let here = Position::new(x, y);
                let broken: Exits = cell
                    .exits
                    .directions()
                    .filter(|&direction| {
                        let target = here.offset(direction);
                        grid.get(target.x, target.y)
                            .map_or(true, |neighbour| neighbour.kind == TileKind::OutOfBounds)
                    })
                    .collect();

                if !broken.is_empty() {
                    pruned += broken.bits().count_ones();
                    if let Some(cell) = grid.get_mut(x, y) {
                        cell.exits.remove(broken);
                    }
                }
            }
        }
        pruned
    }

    fn stamp_tag(
        &self,
        grid: &mut Grid<Cell>,
        config: &GenerationConfig,
        cell_size: u32,
        entrance: Position,
        exit: Position,
    ) {
        let mut tag = JsonTag::new();
        tag.set_long("Seed", config.seed as i64);
        tag.set_int("CellSize", cell_size as i32);
        tag.set_int("EntranceX", entrance.x);
        tag.set_int("EntranceY", entrance.y);
        tag.set_int("ExitX", exit.x);
        tag.set_int("ExitY", exit.y);
        grid.set_tag(Some(tag));
    }
}

fn hall_for(from: usize, to: usize, path: &ElbowPath) -> Hall {
    Hall {
        rooms: (from, to),
        doors: (path.start, path.end),
        bend: path.bend,
    }
}

impl Generator<Layout> for HallwayGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HallwaysResult<Layout> {
        config.validate()?;
        info!(
            "Generating {}x{} layout with seed {}",
            config.field_size, config.field_size, config.seed
        );

        let palettes = config.resolved_palettes();
        let mut grid = Grid::new(config.field_size, config.field_size);

        let (entrance, exit) = self.resolve_entrance_exit(config, &grid, rng);
        debug!("Entrance {} exit {}", entrance, exit);

        let cell_size = utils::coarse_cell_size(grid.width(), config.max_room_size);
        let cells_across = grid.width() / cell_size;
        debug!(
            "Lattice cell size {} gives {}x{} rooms",
            cell_size, cells_across, cells_across
        );

        let mut rooms = self.place_rooms(config, &palettes, cell_size, cells_across, rng);
        for room in &rooms {
            self.plot_room(&mut grid, room);
        }

        let mut state = Connectivity::new(rooms.len());
        let seed_room = state
            .disconnected
            .swap_remove(rng.gen_range(0..state.disconnected.len()));
        state.connected.push(seed_room);

        let mut halls = Vec::new();
        if !state.disconnected.is_empty() {
            let hall = self.connect_seed(&mut grid, &rooms, cell_size, seed_room, &state, rng)?;
            state.mark_connected(hall.rooms.1);
            halls.push(hall);
        }

        let iterations =
            self.connect_remaining(&mut grid, &rooms, cell_size, &mut state, &mut halls, rng);

        let pruned = self.prune_exits(&mut grid);
        trace!("Pruned {} dangling exits", pruned);

        for hall in &halls {
            rooms[hall.rooms.0].add_connection(hall.rooms.1);
            rooms[hall.rooms.1].add_connection(hall.rooms.0);
        }
        self.stamp_tag(&mut grid, config, cell_size, entrance, exit);

        let mut disconnected = state.disconnected;
        disconnected.sort_unstable();
        info!(
            "Generated {} rooms, {} halls in {} iterations ({} disconnected)",
            rooms.len(),
            halls.len(),
            iterations,
            disconnected.len()
        );

        Ok(Layout {
            grid,
            rooms,
            halls,
            entrance,
            exit,
            cell_size,
            cells_across,
            seed_room,
            disconnected,
            iterations,
        })
    }

    fn validate(&self, layout: &Layout, _config: &GenerationConfig) -> HallwaysResult<()> {
        utils::validate_grid(&layout.grid)?;

        for room in &layout.rooms {
            for pos in room.all_positions() {
                match layout.grid.get(pos.x, pos.y) {
                    Some(cell) if cell.kind == TileKind::Room => {}
                    _ => {
                        return Err(HallwaysError::InvalidLayout(format!(
                            "room {} cell {} is not carved as room",
                            room.id, pos
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "HallwayGenerator"
    }
}

impl Default for HallwayGenerator {
    fn default() -> Self {
        Self::new()
    }
}
