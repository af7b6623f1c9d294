//! Terminal progress display over collapsed cells

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Reports how many cells of the grid have collapsed
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a bar for a grid of `total_cells` cells
    pub fn new(total_cells: usize, label: &str) -> Self {
        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label.to_string());
        Self { bar }
    }

    /// Create a bar that draws nothing
    pub fn hidden(total_cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_cells as u64);
        Self { bar }
    }

    /// Report the current number of collapsed cells
    pub fn update(&self, collapsed: usize) {
        self.bar.set_position(collapsed as u64);
    }

    /// Current reported position
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Total number of cells
    pub fn length(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Mark the run as finished successfully
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }

    /// Clear the bar after a failed run
    pub fn abandon(&self, reason: &str) {
        self.bar.abandon_with_message(reason.to_string());
    }
}
