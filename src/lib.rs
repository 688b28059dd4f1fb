//! # Hallways
//!
//! Procedural room-and-hallway dungeon layouts on a 2D grid.
//!
//! ## Architecture Overview
//!
//! Generation places one randomized room in each cell of a coarse lattice,
//! then grows a connected set of rooms by carving two-segment orthogonal
//! corridors between them until every room is reachable (or the search budget
//! runs out). Every grid cell records its classification, palette and which
//! of its four sides are open.
//!
//! - **World**: [`Position`], [`Direction`], [`Exits`], [`Cell`] and the
//!   dense [`Grid`] container
//! - **Generation**: [`GenerationConfig`], the [`Generator`] trait and the
//!   [`HallwayGenerator`] that produces a [`Layout`]
//! - **Serialization**: the [`TagCompound`] record interface cells encode into
//! - **Rendering**: ASCII output and a macroquad preview window
//!
//! ## Example
//!
//! ```
//! use hallways::{GenerationConfig, Generator, HallwayGenerator};
//!
//! let config = GenerationConfig::for_testing(7);
//! let layout = HallwayGenerator::new().generate_from_config(&config).unwrap();
//! assert!(!layout.rooms.is_empty());
//! ```

pub mod generation;
pub mod rendering;
pub mod serialization;
pub mod utils;
pub mod world;

pub use generation::*;
pub use rendering::*;
pub use serialization::*;
pub use utils::*;
pub use world::*;

/// Core error type for layout generation.
#[derive(thiserror::Error, Debug)]
pub enum HallwaysError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation gave up without producing a layout
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// A serialized cell could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Two points are not separated along exactly one axis
    #[error("No cardinal direction from {from} to {to}")]
    AmbiguousDirection { from: Position, to: Position },

    /// A finished layout breaks a structural invariant
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result type used throughout the Hallways codebase.
pub type HallwaysResult<T> = Result<T, HallwaysError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation constants.
pub mod config {
    /// Palette used when none is configured
    pub const DEFAULT_PALETTE: &str = "normal";

    /// Upper bound on spanning-connection iterations
    pub const MAX_CONNECT_ITERATIONS: u32 = 3000;

    /// Attempts to connect the seed room before giving up
    pub const MAX_SEED_ATTEMPTS: u32 = 15;

    /// Default edge length of the square field
    pub const DEFAULT_FIELD_SIZE: u32 = 64;

    /// Default preview zoom in pixels per cell
    pub const DEFAULT_ZOOM: u32 = 9;
}
