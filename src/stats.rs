use serde::Serialize;

use crate::analyzers::aggregate::{student_status, topper};
use crate::analyzers::grade::Status;
use crate::analyzers::types::StudentRecord;
use crate::analyzers::utility::{mean, round2};

/// Dashboard figures for a whole cohort.
#[derive(Debug, Clone, Serialize)]
pub struct CohortStats<'a> {
    pub total_students: usize,
    /// Mean obtained total over students with a recorded total, 2 dp.
    /// `None` when no student has one.
    pub average_marks: Option<f64>,
    /// Mean SGPA over students with a recorded SGPA, 2 dp.
    pub average_sgpa: Option<f64>,
    pub topper: Option<&'a StudentRecord>,
    pub pass_count: usize,
    pub fail_count: usize,
}

impl<'a> CohortStats<'a> {
    pub fn from_records(records: &'a [StudentRecord]) -> Self {
        let totals: Vec<f64> = records.iter().filter_map(|r| r.obtained_total).collect();
        let sgpas: Vec<f64> = records.iter().filter_map(|r| r.sgpa).collect();

        let pass_count = records
            .iter()
            .filter(|r| student_status(r) == Status::Pass)
            .count();

        CohortStats {
            total_students: records.len(),
            average_marks: mean(&totals).map(round2),
            average_sgpa: mean(&sgpas).map(round2),
            topper: topper(records),
            pass_count,
            fail_count: records.len() - pass_count,
        }
    }
}
