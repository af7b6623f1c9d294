//! Grid of superposed cells indexed by `(row, col)`
//!
//! The grid is a fixed-size arena owning every cell. Row 0 is the bottom row
//! of the rendered image; `Direction::Top` moves towards higher rows.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::compatibility::{Direction, TileId};
use crate::io::error::{AlgorithmError, Result};

/// A single grid slot: the tiles still possible there
///
/// Candidates only ever shrink. Once collapsed the cell holds exactly one
/// candidate and is never modified again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    candidates: TileBitset,
    collapsed: bool,
}

impl Cell {
    /// Create a fully uncertain cell
    pub fn new(universe: TileBitset) -> Self {
        Self {
            candidates: universe,
            collapsed: false,
        }
    }

    /// Tiles still possible in this cell
    pub const fn candidates(&self) -> &TileBitset {
        &self.candidates
    }

    /// Number of remaining candidates
    pub fn entropy(&self) -> usize {
        self.candidates.count()
    }

    /// Whether a tile has been committed
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Committed tile, if collapsed
    pub fn tile(&self) -> Option<TileId> {
        if self.collapsed {
            self.candidates.nth(0)
        } else {
            None
        }
    }

    /// Intersect the candidates with `allowed`
    ///
    /// Returns whether the candidate set shrank. Collapsed cells are left
    /// untouched.
    pub fn restrict(&mut self, allowed: &TileBitset) -> bool {
        if self.collapsed {
            return false;
        }
        let before = self.candidates.count();
        self.candidates.intersect_with(allowed);
        self.candidates.count() < before
    }

    /// Commit the cell to `tile`
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileId` if `tile` is not a current candidate
    pub fn collapse(&mut self, tile: TileId) -> Result<()> {
        if !self.candidates.contains(tile) {
            return Err(AlgorithmError::InvalidTileId {
                id: tile,
                tile_count: self.candidates.capacity(),
            });
        }
        self.candidates = TileBitset::singleton(self.candidates.capacity(), tile);
        self.collapsed = true;
        Ok(())
    }
}

/// Fixed-size 2D arena of cells with `height` rows and `width` columns
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    tile_count: usize,
}

impl Grid {
    /// Create a grid where every cell holds every tile
    pub fn new(width: usize, height: usize, tile_count: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), Cell::new(TileBitset::all(tile_count))),
            tile_count,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Number of known tiles every cell started with
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Whether `(row, col)` lies inside the grid
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height() && col < self.width()
    }

    /// Cell at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside `[0, height) x [0, width)`
    pub fn get(&self, row: usize, col: usize) -> Result<&Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get([row, col])
            .ok_or(AlgorithmError::OutOfBounds {
                row,
                col,
                dimensions,
            })
    }

    /// Mutable cell at `(row, col)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside `[0, height) x [0, width)`
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut Cell> {
        let dimensions = self.dimensions();
        self.cells
            .get_mut([row, col])
            .ok_or(AlgorithmError::OutOfBounds {
                row,
                col,
                dimensions,
            })
    }

    /// Coordinates of the in-bounds neighbor in `direction`, if any
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = direction.offset();
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.contains(r, c).then_some((r, c))
    }

    /// Iterate `((row, col), cell)` in row-major order
    pub fn indexed_cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> + '_ {
        self.cells.indexed_iter()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell has been collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Committed tile ids, `height` rows by `width` columns
    ///
    /// # Errors
    ///
    /// Returns `Incomplete` if any cell has not collapsed
    pub fn committed_tiles(&self) -> Result<Array2<TileId>> {
        let uncollapsed = self.cells.len() - self.collapsed_count();
        if uncollapsed > 0 {
            return Err(AlgorithmError::Incomplete { uncollapsed });
        }

        let mut tiles = Array2::zeros(self.dimensions());
        for ((row, col), cell) in self.cells.indexed_iter() {
            if let (Some(slot), Some(tile)) = (tiles.get_mut([row, col]), cell.tile()) {
                *slot = tile;
            }
        }
        Ok(tiles)
    }
}
