//! Academic rules, cohort aggregation and report assembly.
//!
//! Everything here is a pure function of an already loaded student
//! collection: grading and pass/fail per subject, stable merit ranking,
//! pagination, cohort chart data, and the per-student [`types::ReportModel`]
//! handed to renderers.

pub mod aggregate;
pub mod grade;
pub mod page;
pub mod report;
pub mod types;
pub mod utility;
