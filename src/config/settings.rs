//! Configuration settings for the simulator

use crate::game_of_life::{Engine, MaxGenerations};
use anyhow::{Context, Result};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rows: usize,
    pub cols: usize,
    pub randomize: bool,
    /// `None` runs without a generation cap
    pub max_generations: Option<u64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub from_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub save_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub tick_millis: u64,
    pub alive_char: char,
    pub dead_char: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                rows: 50,
                cols: 100,
                randomize: true,
                max_generations: Some(200),
                seed: None,
            },
            input: InputConfig::default(),
            output: OutputConfig {
                save_file: PathBuf::from("grid.txt"),
            },
            display: DisplayConfig {
                tick_millis: 250,
                alive_char: '*',
                dead_char: ' ',
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let sized_by_config = self.input.from_file.is_none();
        if sized_by_config && (self.simulation.rows == 0 || self.simulation.cols == 0) {
            anyhow::bail!(
                "Grid size must be positive, got {}x{}",
                self.simulation.rows,
                self.simulation.cols
            );
        }

        if self.simulation.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be positive");
        }

        if self.display.tick_millis == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        if let Some(ref from_file) = self.input.from_file {
            if !from_file.exists() {
                anyhow::bail!("Grid file does not exist: {}", from_file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(rows) = cli_overrides.rows {
            self.simulation.rows = rows;
        }
        if let Some(cols) = cli_overrides.cols {
            self.simulation.cols = cols;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(max_generations);
        }
        if cli_overrides.unbounded {
            self.simulation.max_generations = None;
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if cli_overrides.empty {
            self.simulation.randomize = false;
        }
        if let Some(ref from_file) = cli_overrides.from_file {
            self.input.from_file = Some(from_file.clone());
        }
        if let Some(ref to_file) = cli_overrides.to_file {
            self.output.save_file = to_file.clone();
        }
        if let Some(tick_millis) = cli_overrides.tick_millis {
            self.display.tick_millis = tick_millis;
        }
    }

    pub fn max_generations(&self) -> MaxGenerations {
        self.simulation.max_generations.into()
    }

    /// Build the engine described by these settings.
    ///
    /// A configured input file wins over the size settings; its run keeps the
    /// configured generation cap.
    pub fn build_engine(&self) -> Result<Engine> {
        let mut engine = match self.input.from_file {
            Some(ref path) => Engine::from_file(path)
                .with_context(|| format!("Failed to load grid from {}", path.display()))?,
            None => {
                let mut rng = match self.simulation.seed {
                    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
                    None => ChaCha8Rng::from_entropy(),
                };
                Engine::new(
                    self.simulation.rows,
                    self.simulation.cols,
                    self.simulation.randomize,
                    self.max_generations(),
                    &mut rng,
                )
                .context("Failed to create engine")?
            }
        };

        engine.set_max_generations(self.max_generations());
        Ok(engine)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub max_generations: Option<u64>,
    pub unbounded: bool,
    pub seed: Option<u64>,
    pub empty: bool,
    pub from_file: Option<PathBuf>,
    pub to_file: Option<PathBuf>,
    pub tick_millis: Option<u64>,
}
