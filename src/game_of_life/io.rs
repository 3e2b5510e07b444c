//! File I/O operations for Game of Life grids
//!
//! Format: one line per row, `1` for alive cells and `0` for dead cells.
//! Blank lines are skipped on read; every written row ends with a newline.

use super::{EngineError, Grid};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

/// Load a grid from a text file
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid, EngineError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| EngineError::io(path, source))?;
    let content = String::from_utf8(bytes).map_err(|err| {
        EngineError::MalformedGridFile(format!(
            "{} is not valid UTF-8 (byte {})",
            path.display(),
            err.utf8_error().valid_up_to()
        ))
    })?;

    let grid = parse_grid_from_string(&content)?;
    debug!(
        "loaded {}x{} grid from {}",
        grid.rows,
        grid.cols,
        path.display()
    );
    Ok(grid)
}

/// Parse a grid from a string representation.
///
/// Only `0` and `1` characters count as cells; anything else on a row
/// (carriage returns, stray spaces) is skipped.
pub fn parse_grid_from_string(content: &str) -> Result<Grid, EngineError> {
    let rows: Vec<Vec<bool>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .filter_map(|ch| match ch {
                    '0' => Some(false),
                    '1' => Some(true),
                    _ => None,
                })
                .collect()
        })
        .collect();

    let Some(first) = rows.first() else {
        return Err(EngineError::MalformedGridFile(
            "grid source is empty or contains no rows".to_string(),
        ));
    };

    let width = first.len();
    if width == 0 {
        return Err(EngineError::MalformedGridFile(
            "first row contains no cells".to_string(),
        ));
    }

    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(EngineError::MalformedGridFile(format!(
                "row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                row.len(),
                width
            )));
        }
    }

    Grid::from_rows(rows)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<(), EngineError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| EngineError::io(parent, source))?;
    }

    std::fs::write(path, grid_to_string(grid)).map_err(|source| EngineError::io(path, source))?;
    debug!("saved {}x{} grid to {}", grid.rows, grid.cols, path.display());

    Ok(())
}

/// Convert a grid to string representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.rows * (grid.cols + 1));

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            result.push(if grid.get(row, col) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Create example grid files for trying the simulator
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        ("glider.txt", "0010000\n1010000\n0110000\n0000000\n0000000\n0000000\n"),
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        ("beacon.txt", "000000\n011000\n011000\n000110\n000110\n000000\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
