//! The classic B3/S23 transition rule

use super::Grid;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Compute the next generation of `current` into a fresh grid.
    ///
    /// Every neighbor count is taken from `current`, which is never touched.
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = Grid::new(current.rows, current.cols);

        for row in 0..current.rows {
            for col in 0..current.cols {
                let neighbors = current.count_neighbors(row, col);
                let idx = next.index(row, col);
                next.cells[idx] = Self::should_be_alive(current.get(row, col), neighbors);
            }
        }

        next
    }

    /// Whether a cell with this state and neighbor count is alive next generation
    pub fn should_be_alive(alive: bool, neighbor_count: u8) -> bool {
        neighbor_count == 3 || (neighbor_count == 2 && alive)
    }
}
