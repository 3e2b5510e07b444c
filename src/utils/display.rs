//! Display and output formatting utilities

use crate::driver::{RunSummary, StopReason};
use crate::game_of_life::Grid;

/// Format grids and run results for console output
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.rows * (grid.cols * 3 + 1));
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                output.push(if grid.get(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for col in 0..grid.cols {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols {
                output.push_str(if grid.get(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Format grid statistics
    pub fn format_stats(grid: &Grid) -> String {
        let stats = grid.stats();
        format!(
            "Grid Statistics:\n  Size: {}x{}\n  Living cells: {}\n  Density: {:.1}%\n",
            stats.rows,
            stats.cols,
            stats.living,
            stats.density * 100.0
        )
    }

    /// Format the outcome of a run
    pub fn format_summary(summary: &RunSummary) -> String {
        let reason = match summary.reason {
            StopReason::Quit => "stopped by user",
            StopReason::Settled => "settled (no change between generations)",
            StopReason::GenerationCap => "reached generation cap",
        };

        let mut output = format!(
            "Run Summary:\n  Generation: {}\n  Living cells: {}\n  Outcome: {}\n",
            summary.generation, summary.living_cells, reason
        );
        if summary.saves > 0 || summary.failed_saves > 0 {
            output.push_str(&format!(
                "  Saves: {} ({} failed)\n",
                summary.saves, summary.failed_saves
            ));
        }
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
