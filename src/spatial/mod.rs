//! Spatial data structures
//!
//! Holds the rectangular grid of superposed cells the collapse engine
//! mutates in place.

/// Grid and cell state management
pub mod grid;

pub use grid::{Cell, Grid};
