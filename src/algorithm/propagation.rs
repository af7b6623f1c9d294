use ndarray::Array2;
use std::collections::VecDeque;

use crate::{
    algorithm::bitset::TileBitset,
    algorithm::compatibility::{CompatibilityTable, Direction},
    io::error::{AlgorithmError, Result},
    spatial::Grid,
};

/// Work done by a single propagation pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Cells dequeued and examined (revisits included)
    pub visited: usize,
    /// Examinations that shrank a candidate set
    pub shrunk: usize,
}

/// Tiles a cell may hold given the candidates of its neighbor on `side`
///
/// The union of the neighbor's per-tile support. An absent neighbor (outside
/// the grid) supports every tile.
///
/// # Errors
///
/// Returns `InvalidTileId` if the neighbor holds a tile unknown to the table
pub fn incoming_support(
    table: &CompatibilityTable,
    neighbor: Option<&TileBitset>,
    side: Direction,
) -> Result<TileBitset> {
    let Some(candidates) = neighbor else {
        return Ok(table.universe().clone());
    };

    let mut support = TileBitset::new(table.tile_count());
    for tile in candidates.iter() {
        support.union_with(table.support(tile, side)?);
    }
    Ok(support)
}

/// Intersection of a cell's candidates with the support from all four sides
///
/// # Errors
///
/// Returns `OutOfBounds` for an invalid coordinate
pub fn consistent_candidates(
    grid: &Grid,
    table: &CompatibilityTable,
    row: usize,
    col: usize,
) -> Result<TileBitset> {
    let mut allowed = grid.get(row, col)?.candidates().clone();
    for side in Direction::ALL {
        let neighbor = match grid.neighbor(row, col, side) {
            Some((r, c)) => Some(grid.get(r, c)?.candidates()),
            None => None,
        };
        allowed.intersect_with(&incoming_support(table, neighbor, side)?);
    }
    Ok(allowed)
}

/// Tighten candidate sets breadth-first from `seeds` until nothing changes
///
/// Every cell reachable from a seed is examined at least once. A cell whose
/// candidates shrink puts its neighbors back on the queue even if they were
/// already examined, so on success every uncollapsed cell is consistent with
/// all of its neighbors. Collapsed cells are passed through but never
/// modified.
///
/// # Errors
///
/// Returns `Contradiction` (with step 0) naming the first cell left without
/// candidates, or `OutOfBounds` for a seed outside the grid
pub fn propagate(
    grid: &mut Grid,
    table: &CompatibilityTable,
    seeds: &[(usize, usize)],
) -> Result<PropagationStats> {
    let mut stats = PropagationStats::default();
    let mut queue = VecDeque::with_capacity(seeds.len());
    let mut visited = Array2::from_elem(grid.dimensions(), false);
    let mut queued = Array2::from_elem(grid.dimensions(), false);

    for &(row, col) in seeds {
        let flag = queued.get_mut([row, col]).ok_or(AlgorithmError::OutOfBounds {
            row,
            col,
            dimensions: grid.dimensions(),
        })?;
        if !*flag {
            *flag = true;
            queue.push_back((row, col));
        }
    }

    while let Some((row, col)) = queue.pop_front() {
        stats.visited += 1;
        if let Some(flag) = queued.get_mut([row, col]) {
            *flag = false;
        }
        if let Some(flag) = visited.get_mut([row, col]) {
            *flag = true;
        }

        let shrunk = if grid.get(row, col)?.is_collapsed() {
            false
        } else {
            let allowed = consistent_candidates(grid, table, row, col)?;
            let cell = grid.get_mut(row, col)?;
            let shrunk = cell.restrict(&allowed);
            if cell.candidates().is_empty() {
                tracing::warn!(row, col, "cell lost every candidate during propagation");
                return Err(AlgorithmError::Contradiction { row, col, step: 0 });
            }
            shrunk
        };
        if shrunk {
            stats.shrunk += 1;
        }

        for direction in Direction::ALL {
            let Some((r, c)) = grid.neighbor(row, col, direction) else {
                continue;
            };
            let seen = visited.get([r, c]).copied().unwrap_or(true);
            if let Some(flag) = queued.get_mut([r, c])
                && !*flag
                && (shrunk || !seen)
            {
                *flag = true;
                queue.push_back((r, c));
            }
        }
    }

    tracing::trace!(visited = stats.visited, shrunk = stats.shrunk, "propagation settled");
    Ok(stats)
}

/// Coordinates of every cell, for a sweep over the whole grid
pub fn all_positions(grid: &Grid) -> Vec<(usize, usize)> {
    grid.indexed_cells().map(|(position, _)| position).collect()
}
