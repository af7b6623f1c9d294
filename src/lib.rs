//! Wave function collapse over a rectangular grid of edge-labelled tiles
//!
//! Every cell starts as a superposition of all known tiles. The engine
//! repeatedly collapses a minimum-entropy cell to a random candidate and
//! propagates the consequence until every pair of neighbors is consistent
//! with the compatibility table, then hands the grid to the renderer.

#![forbid(unsafe_code)]

/// Collapse engine, propagation, selection and the compatibility table
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Grid and cell state
pub mod spatial;

pub use algorithm::compatibility::{CompatibilityTable, Direction, TileId};
pub use algorithm::executor::CollapseEngine;
pub use io::error::{AlgorithmError, Result};
