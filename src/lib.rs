//! Conway's Game of Life on a fixed, non-wrapping grid
//!
//! The [`Engine`] keeps two generations, applies the B3/S23 rule and reads and
//! writes the plain `0`/`1` grid format. Front-ends plug in through the
//! [`driver::Driver`] trait.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{Runner, RunSummary};
pub use game_of_life::{Engine, EngineError, Grid, MaxGenerations};
