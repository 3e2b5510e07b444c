//! Command line front-end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use game_of_life::{
    config::{CliOverrides, Settings},
    driver::{ConsoleDriver, Runner, ScriptedDriver},
    game_of_life::{create_example_grids, load_grid_from_file},
    utils::{ColorOutput, GridFormatter},
    MaxGenerations,
};
use log::warn;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "game_of_life")]
#[command(about = "Conway's Game of Life on a bounded grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct GridArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Number of rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns (overrides config)
    #[arg(long)]
    cols: Option<usize>,

    /// Stop after this generation (overrides config)
    #[arg(short, long, conflicts_with = "unbounded")]
    max_generations: Option<u64>,

    /// Run without a generation cap
    #[arg(long)]
    unbounded: bool,

    /// Seed for the random starting grid
    #[arg(long)]
    seed: Option<u64>,

    /// Start from an all-dead grid instead of a random one
    #[arg(long)]
    empty: bool,

    /// Read the starting grid from this file. The configured generation cap
    /// still applies; pass --unbounded to lift it
    #[arg(short, long)]
    from_file: Option<PathBuf>,

    /// Write saved grids to this file
    #[arg(short, long)]
    to_file: Option<PathBuf>,
}

impl GridArgs {
    fn settings(&self, tick_millis: Option<u64>) -> Result<Settings> {
        let mut settings = Settings::load_or_default(&self.config)
            .with_context(|| format!("Failed to load config from {}", self.config.display()))?;

        settings.merge_with_cli(&CliOverrides {
            rows: self.rows,
            cols: self.cols,
            max_generations: self.max_generations,
            unbounded: self.unbounded,
            seed: self.seed,
            empty: self.empty,
            from_file: self.from_file.clone(),
            to_file: self.to_file.clone(),
            tick_millis,
        });

        settings
            .validate()
            .context("Configuration validation failed")?;
        Ok(settings)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive session in the terminal
    Run {
        #[command(flatten)]
        grid: GridArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        tick_millis: Option<u64>,
    },

    /// Run without a UI until the grid settles or the cap is reached
    Simulate {
        #[command(flatten)]
        grid: GridArgs,

        /// Print every generation
        #[arg(long)]
        show_evolution: bool,

        /// Save the final grid to the output file
        #[arg(long)]
        save: bool,
    },

    /// Create a default configuration and example grid files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Print a grid file with coordinates and statistics
    Show {
        /// Grid file
        path: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { grid, tick_millis } => run_command(grid, tick_millis),
        Commands::Simulate {
            grid,
            show_evolution,
            save,
        } => simulate_command(grid, show_evolution, save),
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Show { path, json } => show_command(path, json),
    }
}

fn run_command(args: GridArgs, tick_millis: Option<u64>) -> Result<()> {
    let settings = args.settings(tick_millis)?;
    let mut engine = settings.build_engine()?;

    let summary = {
        let mut driver = ConsoleDriver::new(&settings.display)?;
        Runner::new(&settings.output.save_file).run(&mut engine, &mut driver)?
    };

    println!("{}", GridFormatter::format_summary(&summary));
    Ok(())
}

fn simulate_command(args: GridArgs, show_evolution: bool, save: bool) -> Result<()> {
    let settings = args.settings(None)?;
    let mut engine = settings.build_engine()?;

    if engine.max_generations() == MaxGenerations::Unbounded {
        warn!("running without a generation cap; oscillating patterns never finish");
    }

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Simulating {}x{} grid...",
            engine.rows(),
            engine.cols()
        ))
    );

    let start_time = Instant::now();
    let mut driver = ScriptedDriver::headless().recording(show_evolution);
    let summary = Runner::new(&settings.output.save_file)
        .exit_when_finished(true)
        .run(&mut engine, &mut driver)?;
    let elapsed = start_time.elapsed();

    for frame in driver.frames() {
        println!("Generation {}:", frame.generation);
        println!("{}", GridFormatter::format_grid_compact(&frame.grid));
    }

    if !show_evolution {
        println!("Final State:");
        println!(
            "{}",
            GridFormatter::format_grid_compact(engine.current_generation())
        );
    }

    println!("{}", GridFormatter::format_summary(&summary));
    println!(
        "{}",
        ColorOutput::success(&format!(
            "Done in {:.3}s",
            elapsed.as_secs_f64()
        ))
    );

    if save {
        engine
            .save(&settings.output.save_file)
            .with_context(|| format!("Failed to save {}", settings.output.save_file.display()))?;
        println!(
            "{}",
            ColorOutput::success(&format!(
                "Final grid saved to {}",
                settings.output.save_file.display()
            ))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let patterns_dir = directory.join("patterns");

    for dir in [&config_dir, &patterns_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Skipped: {} (already exists)",
                config_path.display()
            ))
        );
    }

    create_example_grids(&patterns_dir).context("Failed to create example grids")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut glider = Settings::default();
    glider.input.from_file = Some(patterns_dir.join("glider.txt"));
    glider.simulation.max_generations = Some(40);
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    let mut soup = Settings::default();
    soup.simulation.seed = Some(2024);
    soup.simulation.max_generations = None;
    soup.to_file(&examples_dir.join("soup.yaml"))?;

    println!(
        "Created example configurations in: {}",
        examples_dir.display()
    );
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --config {}", config_path.display());

    Ok(())
}

fn show_command(path: PathBuf, json: bool) -> Result<()> {
    let grid = load_grid_from_file(&path)
        .with_context(|| format!("Failed to load grid from {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid.stats())?);
        return Ok(());
    }

    println!("Grid {} ({}x{}):", path.display(), grid.rows, grid.cols);
    println!("{}", GridFormatter::format_grid_with_coords(&grid));
    println!("{}", GridFormatter::format_stats(&grid));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life",
            "simulate",
            "--config",
            "test.yaml",
            "--rows",
            "5",
            "--max-generations",
            "10",
        ]);
        assert!(cli.is_ok());

        let conflicting = Cli::try_parse_from([
            "game_of_life",
            "run",
            "--max-generations",
            "10",
            "--unbounded",
        ]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("patterns/block.txt").exists());

        // The generated example must load from any working directory
        let glider = Settings::from_file(&temp_dir.path().join("config/examples/glider.yaml"))
            .unwrap();
        assert_eq!(
            glider.input.from_file,
            Some(temp_dir.path().join("patterns/glider.txt"))
        );
        let engine = glider.build_engine().unwrap();
        assert_eq!(engine.max_generations(), MaxGenerations::Bounded(40));
        assert_eq!(engine.current_generation().living_count(), 5);
    }

    #[test]
    fn test_from_file_help_mentions_cap() {
        let mut cli = Cli::command();
        let simulate = cli.find_subcommand_mut("simulate").unwrap();
        let help = simulate.render_long_help().to_string();
        assert!(help.contains("configured generation cap"));
    }

    #[test]
    fn test_grid_args_apply_overrides() {
        let temp_dir = tempdir().unwrap();
        let args = GridArgs {
            config: temp_dir.path().join("missing.yaml"),
            rows: Some(6),
            cols: Some(7),
            unbounded: true,
            seed: Some(3),
            ..Default::default()
        };

        let settings = args.settings(Some(50)).unwrap();
        assert_eq!(settings.simulation.rows, 6);
        assert_eq!(settings.simulation.cols, 7);
        assert_eq!(settings.max_generations(), MaxGenerations::Unbounded);
        assert_eq!(settings.display.tick_millis, 50);
    }
}
