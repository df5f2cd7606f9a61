//! Semester result engine.
//!
//! Loads an examination result sheet into normalized [`StudentRecord`]s and
//! derives grades, pass/fail status, merit rank, cohort statistics and
//! per-student [`ReportModel`]s for presentation layers.

pub mod analyzers;
pub mod cache;
pub mod error;
pub mod output;
pub mod parser;
pub mod source;
pub mod stats;
pub mod subjects;

pub use analyzers::types::{ReportModel, StudentRecord};
pub use error::{DataSourceError, ResultError};
pub use subjects::SubjectConfig;

use std::path::Path;

use tracing::info;

use crate::parser::{LoadReport, parse_grid};

/// Loads and normalizes every student row of the sheet at `path`.
///
/// # Errors
///
/// Returns [`ResultError::DataSource`] when the file is missing, unreadable,
/// lacks required columns, or repeats an enrollment number. Unreadable
/// numeric cells do not fail the load; see [`load_with_report`].
pub fn load(path: &Path, subjects: &SubjectConfig) -> Result<Vec<StudentRecord>, ResultError> {
    Ok(load_with_report(path, subjects)?.records)
}

/// Like [`load`], also returning the coercion warnings raised along the way.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_with_report(path: &Path, subjects: &SubjectConfig) -> Result<LoadReport, ResultError> {
    let grid = source::read_grid(path)?;
    let report = parse_grid(&grid, subjects)?;

    info!(
        students = report.records.len(),
        warnings = report.warnings.len(),
        "Result sheet loaded"
    );

    Ok(report)
}
