//! A driver that replays canned input, for headless runs and tests

use super::{Command, Driver, Frame, RunState};
use crate::game_of_life::Grid;
use anyhow::Result;
use std::collections::VecDeque;

/// One frame as the scripted driver saw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    pub generation: u64,
    pub state: RunState,
    pub grid: Grid,
}

pub struct ScriptedDriver {
    commands: VecDeque<Command>,
    when_exhausted: Command,
    record: bool,
    frames: Vec<RecordedFrame>,
    frames_rendered: usize,
}

impl ScriptedDriver {
    /// Replay `commands`, then quit
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            when_exhausted: Command::Quit,
            record: false,
            frames: Vec::new(),
            frames_rendered: 0,
        }
    }

    /// No input at all; pair with [`super::Runner::exit_when_finished`]
    pub fn headless() -> Self {
        Self {
            commands: VecDeque::new(),
            when_exhausted: Command::Continue,
            record: false,
            frames: Vec::new(),
            frames_rendered: 0,
        }
    }

    /// Keep a copy of every rendered frame
    pub fn recording(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }
}

impl Driver for ScriptedDriver {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        self.frames_rendered += 1;
        if self.record {
            self.frames.push(RecordedFrame {
                generation: frame.generation,
                state: frame.state,
                grid: frame.grid.clone(),
            });
        }
        Ok(())
    }

    fn handle_input(&mut self) -> Result<Command> {
        Ok(self.commands.pop_front().unwrap_or(self.when_exhausted))
    }
}
