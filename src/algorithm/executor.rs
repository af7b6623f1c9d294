use crate::{
    algorithm::compatibility::{CompatibilityTable, TileId},
    algorithm::propagation::{PropagationStats, all_positions, propagate},
    algorithm::selection::{RandomSelector, RandomSource, select_cell, select_tile},
    io::error::{AlgorithmError, ErrorContext, Result, WithContext, invalid_parameter},
    io::configuration::MAX_GRID_DIMENSION,
    spatial::Grid,
};

/// Lifecycle of a single run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Grid built, initial sweep not yet performed
    Initializing,
    /// Collapsing and propagating
    Running,
    /// Every cell collapsed
    Complete,
    /// A cell ran out of candidates; the grid must not be used
    Failed,
}

/// One committed collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapseRecord {
    /// Engine step that performed the collapse (1-based)
    pub step: usize,
    /// Row of the collapsed cell
    pub row: usize,
    /// Column of the collapsed cell
    pub col: usize,
    /// Tile committed to the cell
    pub tile: TileId,
}

/// Result of advancing the engine by one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The initial consistency sweep ran
    Initialized(PropagationStats),
    /// A cell was collapsed and its consequences propagated
    Collapsed(CollapseRecord),
    /// Every cell is collapsed; further steps do nothing
    Complete,
}

/// Wave function collapse driver over an owned grid
///
/// Repeatedly picks a minimum-entropy cell, commits it to a random candidate
/// and propagates until the grid is arc-consistent again. There is no
/// backtracking: a cell driven to zero candidates fails the run.
pub struct CollapseEngine<R = RandomSelector> {
    table: CompatibilityTable,
    grid: Grid,
    random: R,
    state: EngineState,
    step: usize,
    history: Vec<CollapseRecord>,
    failure: Option<(usize, usize, usize)>,
}

impl CollapseEngine<RandomSelector> {
    /// Create an engine drawing its choices from a seeded generator
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero or oversized dimension
    pub fn with_seed(
        table: CompatibilityTable,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self> {
        Self::new(table, width, height, RandomSelector::new(seed))
    }
}

impl<R: RandomSource> CollapseEngine<R> {
    /// Create an engine over a fresh `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero or oversized dimension or an
    /// empty table
    pub fn new(table: CompatibilityTable, width: usize, height: usize, random: R) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if table.tile_count() == 0 {
            return Err(invalid_parameter(
                "table",
                &0,
                &"at least one tile is required",
            ));
        }

        let grid = Grid::new(width, height, table.tile_count());
        Ok(Self {
            table,
            grid,
            random,
            state: EngineState::Initializing,
            step: 0,
            history: Vec::with_capacity(width * height),
            failure: None,
        })
    }

    /// Advance the run by one step
    ///
    /// The first call applies the boundary and adjacency rules to every cell
    /// before anything is chosen. Each later call collapses one cell.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` naming the cell left without candidates. The
    /// engine then stays failed and repeats the error on every call.
    pub fn step(&mut self) -> Result<StepOutcome> {
        match self.state {
            EngineState::Complete => Ok(StepOutcome::Complete),
            EngineState::Failed => Err(self.failure_error()),
            EngineState::Initializing => {
                let seeds = all_positions(&self.grid);
                let sweep = self.context("initial sweep", None);
                let stats = self.guarded(sweep, |engine| {
                    propagate(&mut engine.grid, &engine.table, &seeds)
                })?;
                self.state = EngineState::Running;
                tracing::debug!(visited = stats.visited, shrunk = stats.shrunk, "initial sweep");
                Ok(StepOutcome::Initialized(stats))
            }
            EngineState::Running => self.collapse_next(),
        }
    }

    /// Step until every cell is collapsed
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` if the run fails
    pub fn run(&mut self) -> Result<&Grid> {
        while self.step()? != StepOutcome::Complete {}
        Ok(&self.grid)
    }

    fn collapse_next(&mut self) -> Result<StepOutcome> {
        let pick = self.context("select cell", None);
        let Some((row, col)) = self.guarded(pick, |engine| {
            select_cell(&engine.grid, &mut engine.random)
        })?
        else {
            self.state = EngineState::Complete;
            tracing::debug!(steps = self.step, "grid fully collapsed");
            return Ok(StepOutcome::Complete);
        };

        self.step += 1;
        let chosen = self.context("select tile", Some([row, col]));
        let tile = self.guarded(chosen, |engine| {
            let cell = engine.grid.get(row, col)?;
            tracing::trace!(row, col, candidates = %cell.candidates(), "choosing tile");
            select_tile(&engine.grid, row, col, &mut engine.random)
        })?;
        self.grid.get_mut(row, col)?.collapse(tile)?;

        let record = CollapseRecord {
            step: self.step,
            row,
            col,
            tile,
        };
        self.history.push(record);
        tracing::debug!(step = self.step, row, col, tile, "collapsed cell");

        if self.grid.is_fully_collapsed() {
            self.state = EngineState::Complete;
            return Ok(StepOutcome::Collapsed(record));
        }

        let spread = self.context("propagate", None);
        self.guarded(spread, |engine| {
            propagate(&mut engine.grid, &engine.table, &[(row, col)])
        })?;
        Ok(StepOutcome::Collapsed(record))
    }

    const fn context(
        &self,
        operation: &'static str,
        grid_position: Option<[usize; 2]>,
    ) -> ErrorContext {
        ErrorContext {
            step: Some(self.step),
            grid_position,
            operation: Some(operation),
        }
    }

    // Runs `operation`, moving the engine to `Failed` on a contradiction
    fn guarded<T>(
        &mut self,
        context: ErrorContext,
        operation: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let name = context.operation.unwrap_or("step");
        let result = operation(self).with_context(context);
        if let Err(AlgorithmError::Contradiction { row, col, step }) = &result {
            tracing::warn!(operation = name, row, col, step, "run failed");
            self.state = EngineState::Failed;
            self.failure = Some((*row, *col, *step));
        }
        result
    }

    fn failure_error(&self) -> AlgorithmError {
        let (row, col, step) = self.failure.unwrap_or((0, 0, self.step));
        AlgorithmError::Contradiction { row, col, step }
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// The grid being collapsed
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The compatibility relation in use
    pub const fn table(&self) -> &CompatibilityTable {
        &self.table
    }

    /// Every collapse performed so far, in order
    pub fn history(&self) -> &[CollapseRecord] {
        &self.history
    }

    /// Number of collapses performed so far
    pub const fn steps(&self) -> usize {
        self.step
    }

    /// Take the grid out of a completed run
    ///
    /// # Errors
    ///
    /// Returns `Incomplete` unless the run completed
    pub fn into_grid(self) -> Result<Grid> {
        if self.state == EngineState::Complete {
            Ok(self.grid)
        } else {
            Err(AlgorithmError::Incomplete {
                uncollapsed: self.grid.dimensions().0 * self.grid.dimensions().1
                    - self.grid.collapsed_count(),
            })
        }
    }
}
