//! # Utilities Module
//!
//! Graph queries over carved grids.

pub mod reachability;

pub use reachability::*;
