//! Command-line interface: load rules and tiles, collapse a grid, render it

use crate::algorithm::executor::{CollapseEngine, StepOutcome};
use crate::algorithm::selection::RandomSource;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_OUTPUT_PATH, DEFAULT_RULES_PATH, DEFAULT_SEED, DEFAULT_TILE_SIZE,
    DEFAULT_TILES_PATH, DEFAULT_WIDTH, GIF_FRAME_DELAY_MS, GenerationConfig, VISUALIZATION_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_grid_as_png, load_tile_images};
use crate::io::progress::ProgressManager;
use crate::io::rules::RuleSet;
use crate::io::visualization::VisualizationCapture;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Generate tile maps with wave function collapse"
)]
/// Command-line arguments for the tile map generator
pub struct Cli {
    /// Rule file: one `image;top;right;bottom;left` line per tile
    #[arg(value_name = "RULES", default_value = DEFAULT_RULES_PATH)]
    pub rules: PathBuf,

    /// Directory holding the tile images named in the rules
    #[arg(short, long, default_value = DEFAULT_TILES_PATH)]
    pub tiles: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Grid width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Edge length of each tile image in pixels
    #[arg(short = 'S', long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Also write the collapse order as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid and tile geometry requested on the command line
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a value out of range
    pub fn generation_config(&self) -> Result<GenerationConfig> {
        GenerationConfig {
            width: self.width,
            height: self.height,
            tile_size: self.tile_size,
            seed: self.seed,
        }
        .validate()
    }

    /// Path of the collapse animation written next to the output image
    pub fn visualization_path(&self) -> PathBuf {
        let stem = self.output.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = self.output.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}

/// Orchestrates a single generation run
pub struct RunProcessor {
    cli: Cli,
}

impl RunProcessor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load inputs, collapse the grid and write the outputs
    ///
    /// Nothing is written unless every cell collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the rules or tile
    /// images cannot be loaded, the run hits a contradiction or an output
    /// cannot be written
    pub fn process(&self) -> Result<()> {
        let start_time = Instant::now();
        let config = self.cli.generation_config()?;

        let rule_set = RuleSet::from_path(&self.cli.rules)?;
        rule_set.verify_images(&self.cli.tiles)?;
        let images = load_tile_images(&rule_set, &self.cli.tiles, config.tile_size)?;
        let table = rule_set.compatibility_table()?;

        let mut engine = CollapseEngine::with_seed(table, config.width, config.height, config.seed)?;
        let progress = self.progress_for(&self.cli.rules, config.width * config.height);
        if let Err(error) = drive(&mut engine, &progress) {
            progress.abandon("failed");
            return Err(error);
        }
        progress.finish();

        export_grid_as_png(engine.grid(), &images, config.tile_size, &self.cli.output)?;

        if self.cli.visualize {
            let (rows, cols) = engine.grid().dimensions();
            VisualizationCapture::new(rows, cols, engine.history()).export_gif(
                &images,
                config.tile_size,
                &self.cli.visualization_path(),
                GIF_FRAME_DELAY_MS,
            )?;
        }

        tracing::info!(
            steps = engine.steps(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "generation finished"
        );
        Ok(())
    }

    fn progress_for(&self, rules: &Path, cells: usize) -> ProgressManager {
        if self.cli.should_show_progress() {
            let label = rules.file_name().unwrap_or_default().to_string_lossy();
            ProgressManager::new(cells, &label)
        } else {
            ProgressManager::hidden(cells)
        }
    }
}

/// Step an engine to completion, reporting collapsed cells as it goes
///
/// # Errors
///
/// Returns the engine's `Contradiction` if the run fails
pub fn drive<R: RandomSource>(
    engine: &mut CollapseEngine<R>,
    progress: &ProgressManager,
) -> Result<()> {
    loop {
        match engine.step()? {
            StepOutcome::Complete => return Ok(()),
            StepOutcome::Initialized(_) | StepOutcome::Collapsed(_) => {
                progress.update(engine.grid().collapsed_count());
            }
        }
    }
}
