//! Input/output: rules, tile images, rendering and the command line

/// Command-line interface and run orchestration
pub mod cli;
/// Constants and runtime configuration
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Tile image loading and grid rendering
pub mod image;
/// Terminal progress display
pub mod progress;
/// Rule file parsing
pub mod rules;
/// Animated GIF of the collapse order
pub mod visualization;
