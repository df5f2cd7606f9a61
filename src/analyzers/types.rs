//! Data types shared by the aggregation and report pipeline.

use serde::Serialize;

use crate::analyzers::grade::{Grade, Status};

/// Marks for one configured subject. `None` marks a missing or unreadable cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectMarks {
    pub name: String,
    pub internal: Option<f64>,
    pub external: Option<f64>,
    pub total: Option<f64>,
}

/// One normalized row of the result sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub enrollment_no: String,
    pub roll_no: String,
    pub obtained_total: Option<f64>,
    pub sgpa: Option<f64>,
    pub max_marks: Option<f64>,
    pub total_credits: Option<f64>,
    pub grade_points: Option<f64>,
    pub total_cp: Option<f64>,
    /// One entry per configured subject, in configuration order.
    pub subject_marks: Vec<SubjectMarks>,
}

impl StudentRecord {
    pub fn subject(&self, name: &str) -> Option<&SubjectMarks> {
        self.subject_marks.iter().find(|s| s.name == name)
    }
}

/// A student paired with their 1-based position in the merit order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankedStudent<'a> {
    pub rank: usize,
    pub student: &'a StudentRecord,
}

/// A subject line of a report card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRow {
    pub name: String,
    pub internal: Option<f64>,
    pub external: Option<f64>,
    pub total: Option<f64>,
    pub grade: Grade,
    pub status: Status,
}

/// Sheet-level totals printed at the foot of a report card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub obtained_total: Option<f64>,
    pub max_marks: Option<f64>,
    pub sgpa: Option<f64>,
    pub total_credits: Option<f64>,
    pub grade_points: Option<f64>,
    pub total_cp: Option<f64>,
}

/// Renderer-agnostic result of one student.
///
/// This is everything a dashboard, chart or PDF collaborator receives; it
/// carries no markup, image paths or behavior beyond read accessors. It is a
/// pure function of the record, the subject table and the rank, so the same
/// inputs always build an equal model; renderers stamp their own time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub title: String,
    pub enrollment_no: String,
    pub roll_no: String,
    pub rank: usize,
    pub subjects: Vec<SubjectRow>,
    pub summary: ReportSummary,
    pub overall_status: Status,
}

impl ReportModel {
    /// Subject name to total marks, in subject order. Missing totals count as
    /// zero so a chart keeps one slice per subject.
    pub fn chart_data(&self) -> Vec<(String, f64)> {
        self.subjects
            .iter()
            .map(|row| (row.name.clone(), row.total.unwrap_or(0.0)))
            .collect()
    }
}

/// One page of the student list in load order.
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_students: usize,
    pub students: &'a [StudentRecord],
}
