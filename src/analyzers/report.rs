use tracing::debug;

use crate::analyzers::aggregate::{find_student, rank_of};
use crate::analyzers::grade::{Status, grade_from_marks, pass_fail};
use crate::analyzers::types::{ReportModel, ReportSummary, StudentRecord, SubjectRow};
use crate::error::ResultError;
use crate::subjects::SubjectConfig;

/// Title carried on every report card.
pub const REPORT_TITLE: &str = "Semester 5 Result Report";

/// Assembles the report card of `record`.
///
/// Subject rows follow `subjects` order. A subject absent from the record
/// yields a row of missing marks, which grades as `-` and fails. `rank_fn`
/// resolves the student's merit position from their enrollment number.
#[tracing::instrument(skip_all, fields(enrollment_no = %record.enrollment_no))]
pub fn build_report<F>(
    record: &StudentRecord,
    subjects: &SubjectConfig,
    rank_fn: F,
) -> Result<ReportModel, ResultError>
where
    F: FnOnce(&str) -> Result<usize, ResultError>,
{
    let rank = rank_fn(&record.enrollment_no)?;

    let rows: Vec<SubjectRow> = subjects
        .iter()
        .map(|subject| {
            let marks = record.subject(&subject.name);
            let internal = marks.and_then(|m| m.internal);
            let external = marks.and_then(|m| m.external);
            let total = marks.and_then(|m| m.total);

            SubjectRow {
                name: subject.name.clone(),
                internal,
                external,
                total,
                grade: grade_from_marks(total),
                status: pass_fail(total, internal, external),
            }
        })
        .collect();

    let overall_status = if rows.iter().all(|r| r.status == Status::Pass) {
        Status::Pass
    } else {
        Status::Fail
    };

    debug!(rank, subjects = rows.len(), %overall_status, "Report assembled");

    Ok(ReportModel {
        title: REPORT_TITLE.to_string(),
        enrollment_no: record.enrollment_no.clone(),
        roll_no: record.roll_no.clone(),
        rank,
        subjects: rows,
        summary: ReportSummary {
            obtained_total: record.obtained_total,
            max_marks: record.max_marks,
            sgpa: record.sgpa,
            total_credits: record.total_credits,
            grade_points: record.grade_points,
            total_cp: record.total_cp,
        },
        overall_status,
    })
}

/// Finds `enrollment_no` in `records` and builds its report, ranked against
/// the whole cohort.
pub fn build_report_for(
    records: &[StudentRecord],
    enrollment_no: &str,
    subjects: &SubjectConfig,
) -> Result<ReportModel, ResultError> {
    let student = find_student(records, enrollment_no)?;
    build_report(student, subjects, |enrollment| rank_of(records, enrollment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::grade::Grade;
    use crate::analyzers::types::SubjectMarks;
    use crate::subjects::SubjectColumns;

    fn subjects() -> SubjectConfig {
        SubjectConfig::new(vec![
            SubjectColumns {
                name: "Networks".to_string(),
                internal: "Internal".to_string(),
                external: "External".to_string(),
                total: "Total".to_string(),
            },
            SubjectColumns {
                name: "Databases".to_string(),
                internal: "Internal.1".to_string(),
                external: "External.1".to_string(),
                total: "Total.1".to_string(),
            },
        ])
        .unwrap()
    }

    fn record(enrollment: &str, obtained: f64, networks: (f64, f64, f64)) -> StudentRecord {
        StudentRecord {
            enrollment_no: enrollment.to_string(),
            roll_no: "7".to_string(),
            obtained_total: Some(obtained),
            sgpa: Some(8.1),
            max_marks: Some(200.0),
            total_credits: Some(8.0),
            grade_points: Some(64.0),
            total_cp: Some(64.8),
            subject_marks: vec![
                SubjectMarks {
                    name: "Networks".to_string(),
                    internal: Some(networks.0),
                    external: Some(networks.1),
                    total: Some(networks.2),
                },
                SubjectMarks {
                    name: "Databases".to_string(),
                    internal: Some(30.0),
                    external: Some(52.0),
                    total: Some(82.0),
                },
            ],
        }
    }

    #[test]
    fn test_rows_follow_subject_order_with_grades() {
        let student = record("2101", 172.0, (30.0, 60.0, 90.0));
        let report = build_report(&student, &subjects(), |_| Ok(4)).unwrap();

        assert_eq!(report.rank, 4);
        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.subjects[0].name, "Networks");
        assert_eq!(report.subjects[0].grade, Grade::APlus);
        assert_eq!(report.subjects[1].name, "Databases");
        assert_eq!(report.subjects[1].grade, Grade::A);
        assert_eq!(report.overall_status, Status::Pass);
        assert_eq!(report.summary.obtained_total, Some(172.0));
        assert_eq!(report.summary.total_cp, Some(64.8));
    }

    #[test]
    fn test_failing_subject_fails_overall() {
        let student = record("2102", 150.0, (20.0, 48.0, 68.0));
        let report = build_report(&student, &subjects(), |_| Ok(1)).unwrap();

        assert_eq!(report.subjects[0].grade, Grade::B);
        assert_eq!(report.subjects[0].status, Status::Fail);
        assert_eq!(report.overall_status, Status::Fail);
    }

    #[test]
    fn test_subject_missing_from_record() {
        let mut student = record("2103", 90.0, (30.0, 60.0, 90.0));
        student.subject_marks.truncate(1);

        let report = build_report(&student, &subjects(), |_| Ok(1)).unwrap();
        assert_eq!(report.subjects.len(), 2);
        assert_eq!(report.subjects[1].grade, Grade::Missing);
        assert_eq!(report.subjects[1].status, Status::Fail);
        assert_eq!(
            report.chart_data(),
            vec![("Networks".to_string(), 90.0), ("Databases".to_string(), 0.0)]
        );
    }

    #[test]
    fn test_build_report_for_ranks_against_cohort() {
        let records = vec![
            record("2101", 150.0, (30.0, 40.0, 70.0)),
            record("2102", 172.0, (30.0, 60.0, 90.0)),
        ];

        let report = build_report_for(&records, "2101", &subjects()).unwrap();
        assert_eq!(report.rank, 2);

        let err = build_report_for(&records, "0000", &subjects()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_same_inputs_build_equal_reports() {
        let records = vec![
            record("2101", 150.0, (30.0, 40.0, 70.0)),
            record("2102", 172.0, (30.0, 60.0, 90.0)),
        ];

        let first = build_report_for(&records, "2102", &subjects()).unwrap();
        let second = build_report_for(&records, "2102", &subjects()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_failure_propagates() {
        let student = record("2101", 150.0, (30.0, 40.0, 70.0));
        let err = build_report(&student, &subjects(), |e| {
            Err(ResultError::StudentNotFound {
                enrollment_no: e.to_string(),
            })
        })
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
