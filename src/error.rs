//! Error types surfaced by the result engine.
//!
//! Structural problems with the source file and enrollment lookup misses are
//! typed failures. Per-cell coercion problems never appear here; they are
//! reported as [`CellCoercionWarning`](crate::parser::CellCoercionWarning)
//! values alongside a successful load.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a load. No partial result is returned with these.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("result file not found: {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read result file {path:?}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("unsupported result file format: {path:?}")]
    UnsupportedFormat { path: PathBuf },

    #[error("result sheet has no header row after skipping {skipped} banner rows")]
    EmptySheet { skipped: usize },

    #[error("result sheet is missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("duplicate enrollment number {enrollment_no} on rows {first_row} and {row}")]
    DuplicateEnrollment {
        enrollment_no: String,
        first_row: usize,
        row: usize,
    },
}

/// Errors returned by the public engine API.
#[derive(Error, Debug)]
pub enum ResultError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("student not found: {enrollment_no}")]
    StudentNotFound { enrollment_no: String },

    #[error("invalid subject configuration: {0}")]
    Config(String),
}

impl ResultError {
    /// True when the boundary should render a "not found" response rather
    /// than a hard failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResultError::StudentNotFound { .. })
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ResultError::StudentNotFound { .. } => 2,
            ResultError::DataSource(_) | ResultError::Config(_) => 3,
        }
    }
}
