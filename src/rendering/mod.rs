//! # Rendering Module
//!
//! Output for generated grids: a plain text dump and a macroquad preview
//! window. Neither is needed to generate a layout.

pub mod ascii;
pub mod preview;

pub use ascii::*;
pub use preview::*;
