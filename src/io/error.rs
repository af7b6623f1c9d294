//! Error types and context management for collapse operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Rule source is malformed
    ///
    /// Raised before any collapse begins, e.g. for a wrong field count,
    /// an empty rule set or a reference to a tile image that does not exist
    InvalidRuleData {
        /// 1-based line of the rule source, when the problem is tied to one
        line: Option<usize>,
        /// Description of what's wrong with the rule data
        reason: String,
    },

    /// Tile identifier outside the known tile sequence
    InvalidTileId {
        /// The offending identifier
        id: usize,
        /// Number of known tiles
        tile_count: usize,
    },

    /// Grid coordinate outside `[0, height) x [0, width)`
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// A cell was driven to zero candidates during propagation
    Contradiction {
        /// Row of the emptied cell
        row: usize,
        /// Column of the emptied cell
        col: usize,
        /// Engine step at which the contradiction surfaced
        step: usize,
    },

    /// Grid still holds uncollapsed cells where a finished grid is required
    Incomplete {
        /// Number of cells not yet collapsed
        uncollapsed: usize,
    },

    /// A grid or tile geometry value is out of range
    InvalidParameter {
        /// Parameter name as given on the command line
        parameter: &'static str,
        /// Rejected value
        value: String,
        /// Accepted range or constraint
        reason: String,
    },

    /// A tile image named by the rules could not be read or decoded
    ImageLoad {
        /// Tile image path
        path: PathBuf,
        /// Decoder error
        source: image::ImageError,
    },

    /// The rendered map or animation could not be written
    ImageExport {
        /// Output path
        path: PathBuf,
        /// Encoder error
        source: image::ImageError,
    },

    /// Reading rules or creating output locations failed
    FileSystem {
        /// Path being accessed
        path: PathBuf,
        /// What was being attempted
        operation: &'static str,
        /// I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRuleData { line, reason } => match line {
                Some(line) => write!(f, "Invalid rule data on line {line}: {reason}"),
                None => write!(f, "Invalid rule data: {reason}"),
            },
            Self::InvalidTileId { id, tile_count } => {
                write!(f, "Tile id {id} is out of range ({tile_count} tiles known)")
            }
            Self::OutOfBounds {
                row,
                col,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({row}, {col}) is outside the {}x{} grid",
                    dimensions.0, dimensions.1
                )
            }
            Self::Contradiction { row, col, step } => {
                write!(
                    f,
                    "Contradiction at cell ({row}, {col}) on step {step}: no candidate tiles remain"
                )
            }
            Self::Incomplete { uncollapsed } => {
                write!(f, "Grid is incomplete: {uncollapsed} cells are not collapsed")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Engine state attached to errors raised below the engine
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current engine step
    pub step: Option<usize>,
    /// Overriding `(row, col)` for positional errors
    pub grid_position: Option<[usize; 2]>,
    /// Name of the engine operation
    pub operation: Option<&'static str>,
}

/// Enriches error messages with engine state information
pub trait WithContext<T> {
    /// Apply `context` to a positional error
    ///
    /// # Errors
    ///
    /// Returns the original error with the context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only positional errors benefit from engine context
            match &mut error {
                AlgorithmError::Contradiction { row, col, step } => {
                    if let Some(s) = context.step {
                        *step = s;
                    }
                    if let Some([r, c]) = context.grid_position {
                        *row = r;
                        *col = c;
                    }
                }
                AlgorithmError::OutOfBounds { row, col, .. } => {
                    if let Some([r, c]) = context.grid_position {
                        *row = r;
                        *col = c;
                    }
                }
                _ => {}
            }
            error
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid rule data error tied to a rule source line
pub fn invalid_rule(line: Option<usize>, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidRuleData {
        line,
        reason: reason.to_string(),
    }
}
