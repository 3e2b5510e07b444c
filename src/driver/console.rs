//! Terminal driver built on crossterm
//!
//! Keys: `Esc`/`q` quit, `Space` pause, `Tab`/`s` save. A left click toggles
//! the cell under the pointer.

use super::{Command, Driver, Frame};
use crate::config::DisplayConfig;
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::Print,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::error;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const KEY_HELP: &str = "space: pause  tab/s: save  esc/q: quit  click: toggle";

pub struct ConsoleDriver {
    stdout: Stdout,
    tick: Duration,
    last_tick: Instant,
    alive_char: char,
    dead_char: char,
}

impl ConsoleDriver {
    /// Take over the terminal; it is restored when the driver is dropped
    pub fn new(display: &DisplayConfig) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
        .context("failed to enter alternate screen")?;

        Ok(Self {
            stdout,
            tick: Duration::from_millis(display.tick_millis),
            last_tick: Instant::now(),
            alive_char: display.alive_char,
            dead_char: display.dead_char,
        })
    }

    fn translate(event: Event) -> Option<Command> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Command::Quit)
                }
                KeyCode::Char(' ') => Some(Command::TogglePause),
                KeyCode::Tab | KeyCode::Char('s') => Some(Command::Save),
                _ => None,
            },
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => cell_under(column, row).map(|(row, col)| Command::Toggle { row, col }),
            _ => None,
        }
    }
}

/// Grid coordinates under a terminal position; the border occupies row and column 0
fn cell_under(column: u16, row: u16) -> Option<(usize, usize)> {
    let col = column.checked_sub(1)?;
    let row = row.checked_sub(1)?;
    Some((usize::from(row), usize::from(col)))
}

impl Driver for ConsoleDriver {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let grid = frame.grid;
        let horizontal = "─".repeat(grid.cols);

        queue!(self.stdout, cursor::MoveTo(0, 0), Print(format!("┌{horizontal}┐")))?;

        let mut line = String::with_capacity(grid.cols + 2);
        for row in 0..grid.rows {
            line.clear();
            line.push('│');
            for col in 0..grid.cols {
                line.push(if grid.get(row, col) {
                    self.alive_char
                } else {
                    self.dead_char
                });
            }
            line.push('│');
            let y = u16::try_from(row + 1).unwrap_or(u16::MAX);
            queue!(self.stdout, cursor::MoveTo(0, y), Print(&line))?;
        }

        let footer = u16::try_from(grid.rows + 1).unwrap_or(u16::MAX);
        queue!(
            self.stdout,
            cursor::MoveTo(0, footer),
            Print(format!("└{horizontal}┘")),
            cursor::MoveTo(0, footer.saturating_add(1)),
            terminal::Clear(ClearType::CurrentLine),
            Print(format!(
                "generation {} | {} | {} alive | {}",
                frame.generation,
                frame.state,
                grid.living_count(),
                KEY_HELP
            ))
        )?;

        self.stdout.flush()?;
        Ok(())
    }

    fn handle_input(&mut self) -> Result<Command> {
        let deadline = self.last_tick + self.tick;

        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                self.last_tick = Instant::now();
                return Ok(Command::Continue);
            }
            if let Some(command) = Self::translate(event::read()?) {
                return Ok(command);
            }
        }
    }
}

impl Drop for ConsoleDriver {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            self.stdout,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        ) {
            error!("failed to leave alternate screen: {err}");
        }
        if let Err(err) = disable_raw_mode() {
            error!("failed to disable raw mode: {err}");
        }
    }
}
