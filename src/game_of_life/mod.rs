//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{Engine, MaxGenerations};
pub use error::EngineError;
pub use grid::{Grid, GridStats};
pub use io::{create_example_grids, load_grid_from_file, save_grid_to_file};
pub use rules::GameOfLifeRules;
