//! # Corridor Carving
//!
//! Elbow-shaped hallways between two rooms.
//!
//! A hallway is two axis-aligned [`Segment`]s meeting at a single bend. Every
//! candidate path is first probed with [`ElbowPath::would_collide`], which
//! never touches the grid, and only a clear path is committed with
//! [`ElbowPath::carve`]. A failed attempt therefore leaves the grid exactly as
//! it was.

use super::Room;
use crate::world::{Cell, Direction, Grid, Position, TileKind};
use crate::HallwaysResult;
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;

/// A straight, axis-aligned run of cells including both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Position,
    pub to: Position,
    /// `None` for a single-cell segment
    heading: Option<Direction>,
}

impl Segment {
    /// Creates a segment between two points sharing a row or column.
    ///
    /// Fails with [`crate::HallwaysError::AmbiguousDirection`] when the
    /// endpoints differ along both axes.
    pub fn new(from: Position, to: Position) -> HallwaysResult<Self> {
        let heading = if from == to {
            None
        } else {
            Some(Direction::from_to(from, to)?)
        };
        Ok(Self { from, to, heading })
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    /// Number of cells the segment covers.
    pub fn len(&self) -> u32 {
        self.from.manhattan_distance(self.to) + 1
    }

    /// Cells from `from` to `to`, inclusive.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let step = self.heading.map_or(Position::origin(), Direction::to_delta);
        let from = self.from;
        (0..self.len() as i32).map(move |i| Position::new(from.x + step.x * i, from.y + step.y * i))
    }

    /// Checks whether any covered cell already holds carved geometry.
    pub fn would_collide(&self, grid: &Grid<Cell>) -> bool {
        self.positions().any(|pos| {
            grid.get(pos.x, pos.y)
                .is_some_and(|cell| cell.kind != TileKind::OutOfBounds)
        })
    }

    /// Marks every covered cell as hallway and links consecutive cells with
    /// reciprocal exits.
    pub fn carve(&self, grid: &mut Grid<Cell>, palette: &str) {
        let mut previous: Option<Position> = None;
        for pos in self.positions() {
            let cell = grid.get_or_create(pos.x, pos.y, Cell::default);
            cell.kind = TileKind::Hallway;
            cell.palette = Some(palette.to_string());

            if let (Some(prev), Some(heading)) = (previous, self.heading) {
                cell.open_exit(heading.opposite());
                grid.get_or_create(prev.x, prev.y, Cell::default)
                    .open_exit(heading);
            }
            previous = Some(pos);
        }
    }
}

/// A two-segment path `start -> bend -> end` with one right-angle turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElbowPath {
    pub start: Position,
    pub bend: Position,
    pub end: Position,
}

impl ElbowPath {
    pub fn new(start: Position, bend: Position, end: Position) -> Self {
        Self { start, bend, end }
    }

    /// Bends at `(start.x, end.y)`: vertical leg first.
    pub fn rise_first(start: Position, end: Position) -> Self {
        Self::new(start, Position::new(start.x, end.y), end)
    }

    /// Bends at `(end.x, start.y)`: horizontal leg first.
    pub fn run_first(start: Position, end: Position) -> Self {
        Self::new(start, Position::new(end.x, start.y), end)
    }

    pub fn segments(&self) -> HallwaysResult<(Segment, Segment)> {
        Ok((
            Segment::new(self.start, self.bend)?,
            Segment::new(self.bend, self.end)?,
        ))
    }

    /// Dry run: true if either leg would cross carved geometry or the path
    /// is not made of axis-aligned legs.
    pub fn would_collide(&self, grid: &Grid<Cell>) -> bool {
        match self.segments() {
            Ok((first, second)) => first.would_collide(grid) || second.would_collide(grid),
            Err(_) => true,
        }
    }

    /// Commits the path. Call only after [`ElbowPath::would_collide`] said
    /// the path is clear.
    pub fn carve(&self, grid: &mut Grid<Cell>, palette: &str) -> HallwaysResult<()> {
        let (first, second) = self.segments()?;
        first.carve(grid, palette);
        second.carve(grid, palette);
        self.fix_corner(grid);
        Ok(())
    }

    /// Opens the bend toward both legs and gives each leg's first cell past
    /// the bend its back-reference.
    fn fix_corner(&self, grid: &mut Grid<Cell>) {
        for terminal in [self.start, self.end] {
            let Ok(towards) = Direction::from_to(self.bend, terminal) else {
                continue;
            };
            grid.get_or_create(self.bend.x, self.bend.y, Cell::default)
                .open_exit(towards);
            let neighbour = self.bend.offset(towards);
            grid.get_or_create(neighbour.x, neighbour.y, Cell::default)
                .open_exit(towards.opposite());
        }
    }
}

/// Picks the cell just outside `a` where a hallway toward `b` attaches.
///
/// The terminal sits on whichever side of `a` faces `b` along the dominant
/// axis of the centre-to-centre offset, at a random spot along that side.
pub fn terminal(a: &Room, b: &Room, rng: &mut StdRng) -> Position {
    let delta = b.center() - a.center();
    if delta.x.abs() > delta.y.abs() {
        let x = if delta.x > 0 {
            a.top_left.x + a.width as i32
        } else {
            a.top_left.x - 1
        };
        let y = a.top_left.y + rng.gen_range(0..a.height as i32);
        Position::new(x, y)
    } else {
        let x = a.top_left.x + rng.gen_range(0..a.width as i32);
        let y = if delta.y > 0 {
            a.top_left.y + a.height as i32
        } else {
            a.top_left.y - 1
        };
        Position::new(x, y)
    }
}

/// Direction from a terminal next to `room` into the room.
pub fn direction_into_room(terminal: Position, room: &Room) -> Direction {
    if terminal.x < room.top_left.x {
        Direction::East
    } else if terminal.y < room.top_left.y {
        Direction::South
    } else if terminal.x >= room.top_left.x + room.width as i32 {
        Direction::West
    } else {
        Direction::North
    }
}

/// Turns a terminal into a door opening into `room`, and opens the room's
/// border cell back toward it.
pub fn attach_door(grid: &mut Grid<Cell>, terminal: Position, room: &Room) {
    let inward = direction_into_room(terminal, room);
    let door = grid.get_or_create(terminal.x, terminal.y, Cell::default);
    door.kind = TileKind::Door;
    door.palette = Some(room.palette.clone());
    door.open_exit(inward);

    let inside = terminal.offset(inward);
    grid.get_or_create(inside.x, inside.y, Cell::default)
        .open_exit(inward.opposite());
}

/// Tries to carve a hallway from room `a` to room `b`.
///
/// Draws both terminals, then tries the two elbow orientations in random
/// order. Returns the carved path, or `None` with the grid untouched when
/// both orientations collide.
pub fn try_connect_rooms(
    grid: &mut Grid<Cell>,
    a: &Room,
    b: &Room,
    rng: &mut StdRng,
) -> Option<ElbowPath> {
    let start = terminal(a, b, rng);
    let end = terminal(b, a, rng);

    let rise_first = ElbowPath::rise_first(start, end);
    let run_first = ElbowPath::run_first(start, end);
    let candidates = if rng.gen_bool(0.5) {
        [rise_first, run_first]
    } else {
        [run_first, rise_first]
    };

    for path in candidates {
        if path.would_collide(grid) {
            trace!("Elbow {} -> {} -> {} blocked", path.start, path.bend, path.end);
            continue;
        }
        if path.carve(grid, &a.palette).is_ok() {
            attach_door(grid, start, a);
            attach_door(grid, end, b);
            return Some(path);
        }
    }
    None
}
