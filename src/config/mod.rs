//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    CliOverrides, DisplayConfig, InputConfig, OutputConfig, Settings, SimulationConfig,
};
