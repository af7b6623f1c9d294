use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::compatibility::TileId;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Grid;

/// Source of the uniform choices made during a run
///
/// The engine makes exactly two kinds of random choice: which of the
/// minimum-entropy cells to collapse and which candidate to commit. Both go
/// through this trait so a run can be replayed from a fixed choice sequence.
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is never zero
    ///
    /// Callers reduce the result modulo `len`.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for RandomSelector {
    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

/// Coordinates of every uncollapsed cell with the fewest candidates
///
/// Returned in row-major order, empty when every cell is collapsed.
pub fn minimum_entropy_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut least = usize::MAX;
    let mut cells = Vec::new();

    for (position, cell) in grid.indexed_cells() {
        if cell.is_collapsed() {
            continue;
        }
        let entropy = cell.entropy();
        if entropy < least {
            least = entropy;
            cells.clear();
        }
        if entropy == least {
            cells.push(position);
        }
    }

    cells
}

/// Pick the next cell to collapse, uniformly among minimum-entropy cells
///
/// # Errors
///
/// Returns `Contradiction` if the chosen minimum is zero candidates
pub fn select_cell<R: RandomSource + ?Sized>(
    grid: &Grid,
    random: &mut R,
) -> Result<Option<(usize, usize)>> {
    let cells = minimum_entropy_cells(grid);
    if cells.is_empty() {
        return Ok(None);
    }
    let Some(&(row, col)) = cells.get(random.choose_index(cells.len()) % cells.len()) else {
        return Ok(None);
    };

    if grid.get(row, col)?.entropy() == 0 {
        return Err(AlgorithmError::Contradiction { row, col, step: 0 });
    }
    Ok(Some((row, col)))
}

/// Pick one of the cell's candidates uniformly
///
/// # Errors
///
/// Returns `OutOfBounds` for an invalid coordinate or `Contradiction` if the
/// cell has no candidates left
pub fn select_tile<R: RandomSource + ?Sized>(
    grid: &Grid,
    row: usize,
    col: usize,
    random: &mut R,
) -> Result<TileId> {
    let candidates = grid.get(row, col)?.candidates();
    if candidates.is_empty() {
        return Err(AlgorithmError::Contradiction { row, col, step: 0 });
    }
    let count = candidates.count();
    candidates
        .nth(random.choose_index(count) % count)
        .ok_or(AlgorithmError::Contradiction { row, col, step: 0 })
}
