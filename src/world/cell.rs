//! # Cell Model
//!
//! Per-position dungeon state: what a cell is, which palette it was carved
//! with, and which of its four sides are open.

use super::{Direction, Exits};
use crate::serialization::{TagCompound, TagSerializable};
use crate::{HallwaysError, HallwaysResult};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

/// Tag key holding the exit bitmask.
pub const EXITS_KEY: &str = "Exits";
/// Tag key holding the classification ordinal.
pub const TYPE_KEY: &str = "Type";
/// Tag key holding the optional palette name.
pub const PALETTE_KEY: &str = "Palette";

/// Classification of a single cell.
///
/// The discriminant is the wire ordinal used by serialized cells, so the
/// variant order must stay fixed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum TileKind {
    Hallway = 0,
    Room = 1,
    Door = 2,
    /// Void; also the state of a freshly created cell
    #[default]
    OutOfBounds = 3,
    MarkerA = 4,
    MarkerB = 5,
    MarkerC = 6,
}

impl TileKind {
    /// Ordinal written into serialized cells.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Base preview color as `0xRRGGBB`.
    pub fn color(self) -> u32 {
        match self {
            TileKind::Hallway => 0x00FF00,
            TileKind::Room => 0x3377FF,
            TileKind::Door => 0xAACC00,
            TileKind::OutOfBounds => 0x000000,
            TileKind::MarkerA => 0xFF7777,
            TileKind::MarkerB => 0x77FF77,
            TileKind::MarkerC => 0x7777FF,
        }
    }

    /// Glyph used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Hallway => '#',
            TileKind::Room => '.',
            TileKind::Door => '+',
            TileKind::OutOfBounds => ' ',
            TileKind::MarkerA => 'a',
            TileKind::MarkerB => 'b',
            TileKind::MarkerC => 'c',
        }
    }
}

/// One grid position's dungeon state.
///
/// A default cell is [`TileKind::OutOfBounds`] with no palette and no exits.
///
/// # Examples
///
/// ```
/// use hallways::{Cell, Direction, TileKind};
///
/// let mut cell = Cell::new(TileKind::Hallway);
/// cell.set_exits([Direction::North, Direction::South]);
/// assert!(cell.has_exit(Direction::North));
/// assert!(!cell.has_exit(Direction::East));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Visual/thematic style this cell was carved with
    pub palette: Option<String>,
    /// Classification of the cell
    pub kind: TileKind,
    /// Open sides
    pub exits: Exits,
}

impl Cell {
    /// Creates a cell of the given kind with no exits.
    pub fn new(kind: TileKind) -> Self {
        Self {
            palette: None,
            kind,
            exits: Exits::empty(),
        }
    }

    /// Replaces the whole exit set.
    pub fn set_exits(&mut self, directions: impl IntoIterator<Item = Direction>) {
        self.exits = directions.into_iter().collect();
    }

    pub fn clear_exits(&mut self) {
        self.exits = Exits::empty();
    }

    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exits.has(direction)
    }

    pub fn open_exit(&mut self, direction: Direction) {
        self.exits.insert(direction.into());
    }

    pub fn close_exit(&mut self, direction: Direction) {
        self.exits.remove(direction.into());
    }

    /// Encodes exits and classification as `[exit mask, type ordinal]`.
    pub fn to_bytes(&self) -> [u8; 2] {
        [self.exits.bits(), self.kind.ordinal()]
    }

    /// Decodes the compact two-byte form produced by [`Cell::to_bytes`].
    ///
    /// Exit bits above the four cardinal directions are ignored; an unknown
    /// classification ordinal fails the decode.
    pub fn from_bytes(bytes: [u8; 2]) -> HallwaysResult<Self> {
        let [exits, kind] = bytes;
        Ok(Self {
            palette: None,
            kind: decode_kind(kind)?,
            exits: Exits::from_bits_truncate(exits),
        })
    }
}

fn decode_kind(ordinal: u8) -> HallwaysResult<TileKind> {
    TileKind::from_repr(ordinal).ok_or_else(|| {
        HallwaysError::Decode(format!("unknown tile type ordinal {}", ordinal))
    })
}

impl TagSerializable for Cell {
    fn write_tag<T: TagCompound>(&self, tag: &mut T) {
        tag.set_byte(EXITS_KEY, self.exits.bits() as i8);
        tag.set_byte(TYPE_KEY, self.kind.ordinal() as i8);
        if let Some(palette) = &self.palette {
            tag.set_string(PALETTE_KEY, palette);
        }
    }

    fn read_tag<T: TagCompound>(tag: &T) -> HallwaysResult<Self> {
        let exits = tag
            .get_byte(EXITS_KEY)
            .ok_or_else(|| HallwaysError::Decode(format!("missing {} key", EXITS_KEY)))?;
        let kind = tag
            .get_byte(TYPE_KEY)
            .ok_or_else(|| HallwaysError::Decode(format!("missing {} key", TYPE_KEY)))?;

        Ok(Self {
            palette: tag.get_string(PALETTE_KEY),
            kind: decode_kind(kind as u8)?,
            exits: Exits::from_bits_truncate(exits as u8),
        })
    }
}
