//! Generation constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};

/// Default number of grid columns
pub const DEFAULT_WIDTH: usize = 4;
/// Default number of grid rows
pub const DEFAULT_HEIGHT: usize = 4;
/// Default edge length of a tile image in pixels
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default rule source consulted when none is given
pub const DEFAULT_RULES_PATH: &str = "rules.csv";
/// Default directory holding the tile images named by the rules
pub const DEFAULT_TILES_PATH: &str = "tiles";
/// Default output image path
pub const DEFAULT_OUTPUT_PATH: &str = "output.png";

/// Separator between fields of a rule line
pub const RULE_FIELD_SEPARATOR: char = ';';
/// Fields per rule line: image, top, right, bottom, left
pub const RULE_FIELD_COUNT: usize = 5;

// Safety limits to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1024;
/// Maximum allowed tile edge length in pixels
pub const MAX_TILE_SIZE: u32 = 512;

// Output settings
/// Suffix added to the output stem for the collapse animation
pub const VISUALIZATION_SUFFIX: &str = "_collapse";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 80;
/// Multiplier applied to the delay of the final frame
pub const FINAL_FRAME_HOLD: u32 = 25;
/// Color drawn for cells that have not collapsed yet
pub const UNCOLLAPSED_COLOR: [u8; 4] = [128, 128, 128, 255];

/// Validated grid and tile geometry for a single run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Number of grid columns
    pub width: usize,
    /// Number of grid rows
    pub height: usize,
    /// Edge length of every tile image in pixels
    pub tile_size: u32,
    /// Seed for the selection and collapse choices
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationConfig {
    /// Check every value against its allowed range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first value out of range
    pub fn validate(self) -> Result<Self> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("must be between 1 and {MAX_TILE_SIZE}"),
            ));
        }
        Ok(self)
    }
}

fn check_dimension(parameter: &'static str, value: usize) -> Result<()> {
    if value == 0 || value > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(())
}
