//! Two-generation simulation engine
//!
//! The engine keeps the current generation plus a snapshot of the one before
//! it. Comparing the two is how callers learn that a run has settled.

use super::{io, EngineError, GameOfLifeRules, Grid};
use log::{debug, trace};
use rand::Rng;
use std::path::Path;

/// Upper bound on how many generations a run may reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxGenerations {
    #[default]
    Unbounded,
    Bounded(u64),
}

impl From<Option<u64>> for MaxGenerations {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Self::Unbounded, Self::Bounded)
    }
}

#[derive(Debug, Clone)]
pub struct Engine {
    rows: usize,
    cols: usize,
    prev_generation: Grid,
    curr_generation: Grid,
    max_generations: MaxGenerations,
    generation_count: u64,
}

impl Engine {
    /// Create an engine of the given size.
    ///
    /// With `randomize` each cell of the first generation is drawn from `rng`;
    /// otherwise the grid starts out all dead and `rng` is not touched.
    pub fn new<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        randomize: bool,
        max_generations: MaxGenerations,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        check_dimensions(rows, cols)?;

        let curr_generation = if randomize {
            Grid::random(rows, cols, rng)
        } else {
            Grid::new(rows, cols)
        };

        Ok(Self::with_grid(curr_generation, max_generations))
    }

    /// Create an engine whose first generation is all dead
    pub fn empty(
        rows: usize,
        cols: usize,
        max_generations: MaxGenerations,
    ) -> Result<Self, EngineError> {
        check_dimensions(rows, cols)?;
        Ok(Self::with_grid(Grid::new(rows, cols), max_generations))
    }

    /// Create an engine starting from an existing grid
    pub fn from_grid(grid: Grid, max_generations: MaxGenerations) -> Result<Self, EngineError> {
        check_dimensions(grid.rows, grid.cols)?;
        if grid.cells.len() != grid.rows * grid.cols {
            return Err(EngineError::MalformedGridFile(format!(
                "{} cells do not fill a {}x{} grid",
                grid.cells.len(),
                grid.rows,
                grid.cols
            )));
        }
        Ok(Self::with_grid(grid, max_generations))
    }

    /// Load the first generation from a grid file; the run is unbounded
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let grid = io::load_grid_from_file(path)?;
        Self::from_grid(grid, MaxGenerations::Unbounded)
    }

    fn with_grid(curr_generation: Grid, max_generations: MaxGenerations) -> Self {
        let (rows, cols) = (curr_generation.rows, curr_generation.cols);
        Self {
            rows,
            cols,
            prev_generation: Grid::new(rows, cols),
            curr_generation,
            max_generations,
            generation_count: 1,
        }
    }

    /// Write the current generation to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EngineError> {
        io::save_grid_to_file(&self.curr_generation, path)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn generation_count(&self) -> u64 {
        self.generation_count
    }

    pub fn max_generations(&self) -> MaxGenerations {
        self.max_generations
    }

    pub fn set_max_generations(&mut self, max_generations: MaxGenerations) {
        self.max_generations = max_generations;
    }

    pub fn current_generation(&self) -> &Grid {
        &self.curr_generation
    }

    pub fn previous_generation(&self) -> &Grid {
        &self.prev_generation
    }

    /// Read one cell of the current generation
    pub fn cell(&self, row: usize, col: usize) -> Result<bool, EngineError> {
        if !self.curr_generation.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.curr_generation.get(row, col))
    }

    /// Overwrite one cell of the current generation
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        self.curr_generation.set(row, col, alive)
    }

    /// Flip one cell of the current generation and return its new state
    pub fn toggle_cell(&mut self, row: usize, col: usize) -> Result<bool, EngineError> {
        let alive = !self.cell(row, col)?;
        self.curr_generation.set(row, col, alive)?;
        Ok(alive)
    }

    /// Live cells around `(row, col)` in the current generation
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        self.curr_generation.count_neighbors(row, col)
    }

    /// Compute the generation after the current one without applying it
    pub fn next_generation(&self) -> Grid {
        GameOfLifeRules::evolve(&self.curr_generation)
    }

    /// Advance one generation
    pub fn step(&mut self) {
        let next = self.next_generation();
        self.prev_generation = std::mem::replace(&mut self.curr_generation, next);
        self.generation_count += 1;
        trace!(
            "generation {}: {} living cells",
            self.generation_count,
            self.curr_generation.living_count()
        );
    }

    pub fn is_max_generations_exceeded(&self) -> bool {
        match self.max_generations {
            MaxGenerations::Unbounded => false,
            MaxGenerations::Bounded(max) => self.generation_count >= max,
        }
    }

    /// Whether the current generation differs from the previous one
    pub fn is_changing(&self) -> bool {
        self.curr_generation != self.prev_generation
    }

    fn out_of_bounds(&self, row: usize, col: usize) -> EngineError {
        EngineError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), EngineError> {
    if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
        debug!("rejecting {}x{} grid", rows, cols);
        return Err(EngineError::InvalidDimensions { rows, cols });
    }
    Ok(())
}
