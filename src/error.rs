//! Error types for the catalog loader
//!
//! Two layers: [`AppError`] is fatal and stops the run, [`LineError`] is
//! scoped to a single dump line and only causes that line to be skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal error: the run stops in the `Failed` state.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cannot open dump {}: {source}", .path.display())]
    StreamOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read dump {} at line {line}: {source}", .path.display())]
    StreamRead {
        path: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for fatal operations
pub type AppResult<T> = Result<T, AppError>;

/// Recoverable, per-line error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Malformed record: {0}")]
    Parse(String),

    #[error("Missing required field `{0}`")]
    MissingField(&'static str),
}

/// What happened to one dump line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Persisted,
    Skipped(LineError),
}

impl From<LineError> for LineOutcome {
    fn from(e: LineError) -> Self {
        LineOutcome::Skipped(e)
    }
}
