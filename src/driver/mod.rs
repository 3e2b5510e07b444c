//! Front-end drivers and the loop that connects them to an engine
//!
//! A driver only knows how to draw a [`Frame`] and turn user input into a
//! [`Command`]. The [`Runner`] owns the policy: when to step, when a run has
//! finished, and what pause, save and cell edits do to the engine.

pub mod console;
pub mod scripted;

pub use console::ConsoleDriver;
pub use scripted::{RecordedFrame, ScriptedDriver};

use crate::game_of_life::{Engine, Grid, MaxGenerations};
use anyhow::Result;
use log::{debug, error, info};
use std::fmt;
use std::path::PathBuf;

/// What the user asked for since the last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Continue,
    TogglePause,
    Save,
    Toggle { row: usize, col: usize },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    /// Settled or capped; the loop keeps polling until told to quit
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Finished => "finished",
        };
        f.write_str(label)
    }
}

/// Everything a driver needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub generation: u64,
    pub state: RunState,
}

pub trait Driver {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Block for at most one tick and report what the user did.
    ///
    /// `Continue` means the tick elapsed with no input; only then does the
    /// runner advance a generation.
    fn handle_input(&mut self) -> Result<Command>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Quit,
    Settled,
    GenerationCap,
}

/// Outcome of a [`Runner::run`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generation: u64,
    pub living_cells: usize,
    pub saves: usize,
    pub failed_saves: usize,
    pub reason: StopReason,
}

pub struct Runner {
    save_path: PathBuf,
    exit_when_finished: bool,
}

impl Runner {
    pub fn new(save_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            exit_when_finished: false,
        }
    }

    /// Stop as soon as the run settles or hits its cap instead of waiting for `Quit`
    pub fn exit_when_finished(mut self, exit: bool) -> Self {
        self.exit_when_finished = exit;
        self
    }

    /// Drive `engine` with `driver` until the user quits or, in headless mode,
    /// the run finishes.
    pub fn run<D: Driver + ?Sized>(
        &self,
        engine: &mut Engine,
        driver: &mut D,
    ) -> Result<RunSummary> {
        let mut paused = false;
        let mut saves = 0;
        let mut failed_saves = 0;

        let reason = loop {
            let finished = is_finished(engine);
            let state = match (finished, paused) {
                (true, _) => RunState::Finished,
                (false, true) => RunState::Paused,
                (false, false) => RunState::Running,
            };

            driver.render(&Frame {
                grid: engine.current_generation(),
                generation: engine.generation_count(),
                state,
            })?;

            if finished && self.exit_when_finished {
                break finish_reason(engine);
            }

            let ticked = match driver.handle_input()? {
                Command::Continue => true,
                Command::TogglePause if finished && engine.is_max_generations_exceeded() => {
                    info!(
                        "lifting generation cap at generation {}",
                        engine.generation_count()
                    );
                    engine.set_max_generations(MaxGenerations::Unbounded);
                    paused = false;
                    false
                }
                Command::TogglePause => {
                    paused = !paused;
                    false
                }
                Command::Save => {
                    match engine.save(&self.save_path) {
                        Ok(()) => {
                            info!(
                                "saved generation {} to {}",
                                engine.generation_count(),
                                self.save_path.display()
                            );
                            saves += 1;
                        }
                        Err(err) => {
                            error!("{err}");
                            failed_saves += 1;
                        }
                    }
                    false
                }
                Command::Toggle { row, col } => {
                    if let Err(err) = engine.toggle_cell(row, col) {
                        debug!("ignoring edit: {err}");
                    }
                    false
                }
                Command::Quit => break StopReason::Quit,
            };

            if ticked && !paused && !is_finished(engine) {
                engine.step();
            }
        };

        info!(
            "run stopped at generation {} ({:?})",
            engine.generation_count(),
            reason
        );

        Ok(RunSummary {
            generation: engine.generation_count(),
            living_cells: engine.current_generation().living_count(),
            saves,
            failed_saves,
            reason,
        })
    }
}

fn is_finished(engine: &Engine) -> bool {
    !engine.is_changing() || engine.is_max_generations_exceeded()
}

fn finish_reason(engine: &Engine) -> StopReason {
    if engine.is_max_generations_exceeded() {
        StopReason::GenerationCap
    } else {
        StopReason::Settled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn blinker(max_generations: MaxGenerations) -> Engine {
        let mut engine = Engine::empty(5, 5, max_generations).unwrap();
        for col in 1..=3 {
            engine.set_cell(2, col, true).unwrap();
        }
        engine
    }

    #[test]
    fn test_headless_run_stops_at_cap() {
        let mut engine = blinker(MaxGenerations::Bounded(6));
        let mut driver = ScriptedDriver::headless();

        let summary = Runner::new("unused.txt")
            .exit_when_finished(true)
            .run(&mut engine, &mut driver)
            .unwrap();

        assert_eq!(summary.reason, StopReason::GenerationCap);
        assert_eq!(summary.generation, 6);
        assert_eq!(summary.living_cells, 3);
        assert_eq!(driver.frames_rendered(), 6);
    }

    #[test]
    fn test_headless_run_stops_when_settled() {
        let mut engine = Engine::empty(4, 4, MaxGenerations::Unbounded).unwrap();
        for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            engine.set_cell(row, col, true).unwrap();
        }
        let mut driver = ScriptedDriver::headless();

        let summary = Runner::new("unused.txt")
            .exit_when_finished(true)
            .run(&mut engine, &mut driver)
            .unwrap();

        // Generation 1 differs from the all-dead snapshot, generation 2 does not
        assert_eq!(summary.reason, StopReason::Settled);
        assert_eq!(summary.generation, 2);
    }

    #[test]
    fn test_pause_holds_generation() {
        let mut engine = blinker(MaxGenerations::Unbounded);
        let mut driver = ScriptedDriver::new([
            Command::TogglePause,
            Command::Continue,
            Command::Continue,
            Command::TogglePause,
            Command::Continue,
            Command::Quit,
        ])
        .recording(true);

        let summary = Runner::new("unused.txt").run(&mut engine, &mut driver).unwrap();

        let generations: Vec<u64> = driver.frames().iter().map(|f| f.generation).collect();
        assert_eq!(generations, vec![1, 1, 1, 1, 1, 2]);
        assert_eq!(driver.frames()[1].state, RunState::Paused);
        assert_eq!(summary.reason, StopReason::Quit);
        assert_eq!(summary.generation, 2);
    }

    #[test]
    fn test_save_and_failed_save_are_counted() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("saved.txt");
        let mut engine = blinker(MaxGenerations::Unbounded);
        let mut driver = ScriptedDriver::new([Command::Save, Command::Quit]);

        let summary = Runner::new(&path).run(&mut engine, &mut driver).unwrap();
        assert_eq!(summary.saves, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "00000\n00000\n01110\n00000\n00000\n"
        );

        // A directory cannot be written as a file
        let mut engine = blinker(MaxGenerations::Unbounded);
        let mut driver = ScriptedDriver::new([Command::Save, Command::Quit]);
        let summary = Runner::new(temp_dir.path()).run(&mut engine, &mut driver).unwrap();
        assert_eq!(summary.saves, 0);
        assert_eq!(summary.failed_saves, 1);
    }

    #[test]
    fn test_toggle_revives_settled_run() {
        let mut engine = Engine::empty(5, 5, MaxGenerations::Unbounded).unwrap();
        let mut driver = ScriptedDriver::new([
            Command::Continue,
            Command::Toggle { row: 2, col: 1 },
            Command::Toggle { row: 2, col: 2 },
            Command::Toggle { row: 2, col: 3 },
            Command::Toggle { row: 40, col: 40 },
            Command::Continue,
            Command::Quit,
        ])
        .recording(true);

        Runner::new("unused.txt").run(&mut engine, &mut driver).unwrap();

        let frames = driver.frames();
        assert_eq!(frames[0].state, RunState::Finished);
        // The first edit makes the grid differ from the snapshot, so the run is live again
        assert_eq!(frames[2].state, RunState::Running);
        assert_eq!(engine.generation_count(), 2);
        assert_eq!(
            engine.current_generation().living_cells(),
            vec![(1, 2), (2, 2), (3, 2)]
        );
    }

    #[test]
    fn test_input_does_not_advance_generation() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("saved.txt");
        let mut engine = blinker(MaxGenerations::Unbounded);
        let mut driver = ScriptedDriver::new([
            Command::Save,
            Command::Save,
            Command::Toggle { row: 0, col: 0 },
            Command::Toggle { row: 0, col: 0 },
            Command::Save,
            Command::Quit,
        ]);

        let summary = Runner::new(&path).run(&mut engine, &mut driver).unwrap();

        assert_eq!(summary.generation, 1);
        assert_eq!(summary.saves, 3);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "00000\n00000\n01110\n00000\n00000\n"
        );
    }

    #[test]
    fn test_resume_after_cap_lifts_it() {
        let mut engine = blinker(MaxGenerations::Bounded(2));
        let mut driver = ScriptedDriver::new([
            Command::Continue,
            Command::Continue,
            Command::TogglePause,
            Command::Continue,
            Command::Quit,
        ])
        .recording(true);

        Runner::new("unused.txt").run(&mut engine, &mut driver).unwrap();

        let states: Vec<RunState> = driver.frames().iter().map(|f| f.state).collect();
        assert_eq!(
            states,
            vec![
                RunState::Running,
                RunState::Finished,
                RunState::Finished,
                RunState::Running,
                RunState::Running,
            ]
        );
        assert_eq!(engine.max_generations(), MaxGenerations::Unbounded);
        assert_eq!(engine.generation_count(), 3);
    }
}
