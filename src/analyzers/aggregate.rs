use std::cmp::Ordering;

use crate::analyzers::grade::{Status, pass_fail};
use crate::analyzers::types::{RankedStudent, StudentRecord};
use crate::error::ResultError;
use crate::parser::normalize_identifier;
use crate::subjects::SubjectConfig;

/// Orders obtained totals highest first, with missing totals after every
/// recorded one.
fn by_total_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns a new merit order of `records`, ranked 1..=N.
///
/// The sort is stable: students with equal totals keep their load order, so
/// the earlier row always takes the lower rank. The input is not reordered.
pub fn ranked(records: &[StudentRecord]) -> Vec<RankedStudent<'_>> {
    let mut order: Vec<&StudentRecord> = records.iter().collect();
    order.sort_by(|a, b| by_total_desc(a.obtained_total, b.obtained_total));

    order
        .into_iter()
        .enumerate()
        .map(|(idx, student)| RankedStudent {
            rank: idx + 1,
            student,
        })
        .collect()
}

/// The student with the highest obtained total; ties go to the earlier row.
pub fn topper(records: &[StudentRecord]) -> Option<&StudentRecord> {
    ranked(records).first().map(|r| r.student)
}

/// Looks up a student by enrollment number.
///
/// The query goes through the same normalization as loaded identifiers, so
/// `"12345.0"` finds `"12345"`.
pub fn find_student<'a>(
    records: &'a [StudentRecord],
    enrollment_no: &str,
) -> Result<&'a StudentRecord, ResultError> {
    let wanted = normalize_identifier(enrollment_no);
    records
        .iter()
        .find(|r| r.enrollment_no == wanted)
        .ok_or(ResultError::StudentNotFound {
            enrollment_no: wanted,
        })
}

/// 1-based merit position of the student with `enrollment_no`.
pub fn rank_of(records: &[StudentRecord], enrollment_no: &str) -> Result<usize, ResultError> {
    let wanted = normalize_identifier(enrollment_no);
    ranked(records)
        .iter()
        .find(|r| r.student.enrollment_no == wanted)
        .map(|r| r.rank)
        .ok_or(ResultError::StudentNotFound {
            enrollment_no: wanted,
        })
}

/// A student passes overall when every configured subject passes.
pub fn student_status(record: &StudentRecord) -> Status {
    let all_pass = record
        .subject_marks
        .iter()
        .all(|s| pass_fail(s.total, s.internal, s.external) == Status::Pass);

    if all_pass { Status::Pass } else { Status::Fail }
}

/// Subject name to the cohort's summed subject totals, in subject order.
/// Missing totals are skipped.
pub fn cohort_chart(records: &[StudentRecord], subjects: &SubjectConfig) -> Vec<(String, f64)> {
    subjects
        .iter()
        .map(|subject| {
            let sum = records
                .iter()
                .filter_map(|r| r.subject(&subject.name).and_then(|m| m.total))
                .sum::<f64>();
            (subject.name.clone(), sum)
        })
        .collect()
}
