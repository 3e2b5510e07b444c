//! Error types reported by the engine

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by grid construction, editing and persistence
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("malformed grid file: {0}")]
    MalformedGridFile(String),

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("I/O failure on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EngineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
