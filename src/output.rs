//! Output formatting for engine results.
//!
//! Supports JSON serialization, CSV export of the ranked cohort, and a
//! plain-text report card.

use std::fmt;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::aggregate::student_status;
use crate::analyzers::grade::Status;
use crate::analyzers::types::{RankedStudent, ReportModel};

/// Serializes a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Serialize)]
struct ExportRow<'a> {
    rank: usize,
    enrollment_no: &'a str,
    roll_no: &'a str,
    obtained_total: Option<f64>,
    max_marks: Option<f64>,
    sgpa: Option<f64>,
    status: Status,
}

/// Writes the ranked cohort to a CSV file, replacing any existing file.
pub fn write_students_csv(path: &Path, ranked: &[RankedStudent<'_>]) -> Result<()> {
    debug!(path = %path.display(), rows = ranked.len(), "Writing student export");

    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    for entry in ranked {
        let student = entry.student;
        writer.serialize(ExportRow {
            rank: entry.rank,
            enrollment_no: &student.enrollment_no,
            roll_no: &student.roll_no,
            obtained_total: student.obtained_total,
            max_marks: student.max_marks,
            sgpa: student.sgpa,
            status: student_status(student),
        })?;
    }
    writer.flush()?;

    Ok(())
}

fn mark(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Plain-text report card: title, student details, subject table, then
/// summary.
pub struct TextReport<'a> {
    pub report: &'a ReportModel,
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "{}", report.title)?;
        writeln!(f, "Generated {}", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f)?;

        writeln!(f, "Student Details")?;
        writeln!(f, "Enrollment No: {}", report.enrollment_no)?;
        writeln!(f, "Roll No: {}", report.roll_no)?;
        writeln!(f, "Rank: {}", report.rank)?;
        writeln!(f)?;

        let name_width = report
            .subjects
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Subject".len());

        writeln!(f, "Subject Wise Marks")?;
        writeln!(
            f,
            "{:<name_width$}  {:>8}  {:>8}  {:>6}  {:>5}  {:>6}",
            "Subject", "Internal", "External", "Total", "Grade", "Status"
        )?;
        for row in &report.subjects {
            writeln!(
                f,
                "{:<name_width$}  {:>8}  {:>8}  {:>6}  {:>5}  {:>6}",
                row.name,
                mark(row.internal),
                mark(row.external),
                mark(row.total),
                row.grade.as_str(),
                row.status.to_string(),
            )?;
        }
        writeln!(f)?;

        let summary = &report.summary;
        writeln!(f, "Summary")?;
        writeln!(
            f,
            "Total Marks: {} / {}",
            mark(summary.obtained_total),
            mark(summary.max_marks)
        )?;
        writeln!(f, "SGPA: {}", mark(summary.sgpa))?;
        writeln!(f, "Total Credits: {}", mark(summary.total_credits))?;
        writeln!(f, "Grade Points: {}", mark(summary.grade_points))?;
        writeln!(f, "Total CP: {}", mark(summary.total_cp))?;
        writeln!(f, "Result: {}", report.overall_status)
    }
}

/// Renders a report card as plain text, stamped with `generated_at`.
pub fn render_text_report(report: &ReportModel, generated_at: DateTime<Utc>) -> String {
    TextReport {
        report,
        generated_at,
    }
    .to_string()
}
