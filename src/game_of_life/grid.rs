//! Grid representation and utilities for Game of Life

use super::EngineError;
use itertools::Itertools;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// A fixed-size rectangular field of dead/alive cells, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<bool>,
}

/// Summary numbers for a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub rows: usize,
    pub cols: usize,
    pub living: usize,
    pub density: f64,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Create a grid where every cell is independently alive with probability 1/2
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let cells = (0..rows * cols).map(|_| rng.gen_bool(0.5)).collect();
        Self { rows, cols, cells }
    }

    /// Create a grid from row vectors. Ragged input is rejected.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if height == 0 || width == 0 {
            return Err(EngineError::InvalidDimensions {
                rows: height,
                cols: width,
            });
        }

        if let Some((i, row)) = rows.iter().find_position(|row| row.len() != width) {
            return Err(EngineError::MalformedGridFile(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                width
            )));
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Get cell value at coordinates; out of bounds cells read as dead
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.contains(row, col) && self.cells[self.index(row, col)]
    }

    /// Cell value as 0 (dead) or 1 (alive)
    pub fn value(&self, row: usize, col: usize) -> u8 {
        u8::from(self.get(row, col))
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), EngineError> {
        if !self.contains(row, col) {
            return Err(EngineError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = alive;
        Ok(())
    }

    /// Count living cells in the Moore neighborhood of `(row, col)`.
    ///
    /// Coordinates outside the grid contribute nothing; there is no wrap-around.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }

                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
                else {
                    continue;
                };

                if self.get(r, c) {
                    count += 1;
                }
            }
        }

        count
    }

    /// Get all living cell coordinates in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid has no living cells
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    pub fn stats(&self) -> GridStats {
        let living = self.living_count();
        let total = self.rows * self.cols;
        GridStats {
            rows: self.rows,
            cols: self.cols,
            living,
            density: if total == 0 {
                0.0
            } else {
                living as f64 / total as f64
            },
        }
    }
}

/// Renders the grid in its file format: one line of `0`/`1` per row
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                write!(f, "{}", self.value(row, col))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
