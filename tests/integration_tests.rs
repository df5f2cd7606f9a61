use std::path::{Path, PathBuf};

use chrono::Utc;
use semester_results::analyzers::aggregate::{cohort_chart, find_student, rank_of, ranked};
use semester_results::analyzers::grade::{Grade, Status};
use semester_results::analyzers::page::paginate;
use semester_results::analyzers::report::build_report_for;
use semester_results::cache::ResultCache;
use semester_results::output::{render_text_report, write_students_csv};
use semester_results::stats::CohortStats;
use semester_results::subjects::SubjectColumns;
use semester_results::{DataSourceError, ResultError, SubjectConfig, load, load_with_report};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sem5_result.csv")
}

fn workbook_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sem5_result.xlsx")
}

fn single_subject() -> SubjectConfig {
    SubjectConfig::new(vec![SubjectColumns {
        name: "Networks".to_string(),
        internal: "Internal".to_string(),
        external: "External".to_string(),
        total: "Total".to_string(),
    }])
    .unwrap()
}

#[test]
fn test_full_pipeline() {
    let subjects = SubjectConfig::default();
    let records = load(&fixture(), &subjects).expect("Failed to load fixture");

    assert_eq!(records.len(), 5);

    let first = &records[0];
    assert_eq!(first.enrollment_no, "2101001");
    assert_eq!(first.roll_no, "1");
    assert_eq!(first.subject_marks.len(), 8);
    assert_eq!(first.subject_marks[0].name, "Python Programming (Theory)");
    assert_eq!(first.subject_marks[7].name, "Internship / Project – I");
    assert_eq!(first.subject_marks[7].total, Some(70.0));
    assert_eq!(first.total_cp, Some(171.6));
}

#[test]
fn test_bad_cell_becomes_missing_and_row_survives() {
    let report = load_with_report(&fixture(), &SubjectConfig::default()).unwrap();

    let meera = report
        .records
        .iter()
        .find(|r| r.enrollment_no == "2101003")
        .unwrap();
    assert_eq!(meera.sgpa, None);
    assert_eq!(meera.obtained_total, Some(560.0));
    assert_eq!(meera.roll_no, "3");

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row, 10);
    assert_eq!(report.warnings[0].column, "SGPA V");
    assert_eq!(report.warnings[0].raw, "ABS");
}

#[test]
fn test_dashboard_figures() {
    let records = load(&fixture(), &SubjectConfig::default()).unwrap();
    let stats = CohortStats::from_records(&records);

    assert_eq!(stats.total_students, 5);
    assert_eq!(stats.average_marks, Some(550.0));
    assert_eq!(stats.average_sgpa, Some(6.85));
    assert_eq!(stats.topper.unwrap().enrollment_no, "2101002");
    assert_eq!(stats.pass_count, 4);
    assert_eq!(stats.fail_count, 1);
}

#[test]
fn test_merit_order_with_tie_and_missing_total() {
    let records = load(&fixture(), &SubjectConfig::default()).unwrap();

    let order: Vec<_> = ranked(&records)
        .iter()
        .map(|r| r.student.enrollment_no.clone())
        .collect();
    assert_eq!(
        order,
        vec!["2101002", "2101001", "2101003", "2101004", "2101005"]
    );

    assert_eq!(rank_of(&records, "2101001").unwrap(), 2);
    assert_eq!(rank_of(&records, "2101003").unwrap(), 3);
}

#[test]
fn test_lookup_miss_is_typed_and_recoverable() {
    let records = load(&fixture(), &SubjectConfig::default()).unwrap();

    let err = find_student(&records, "0000000").unwrap_err();
    assert!(matches!(err, ResultError::StudentNotFound { .. }));

    assert_eq!(find_student(&records, "2101005").unwrap().roll_no, "5");
}

#[test]
fn test_report_for_failing_student() {
    let subjects = SubjectConfig::default();
    let records = load(&fixture(), &subjects).unwrap();

    let report = build_report_for(&records, "2101004", &subjects).unwrap();
    assert_eq!(report.rank, 4);
    assert_eq!(report.subjects.len(), 8);
    assert_eq!(report.subjects[0].grade, Grade::B);
    assert_eq!(report.subjects[0].status, Status::Fail);
    assert_eq!(report.subjects[1].status, Status::Pass);
    assert_eq!(report.overall_status, Status::Fail);
    assert_eq!(report.summary.max_marks, Some(800.0));

    let chart = report.chart_data();
    assert_eq!(chart.len(), 8);
    assert_eq!(chart[0], ("Python Programming (Theory)".to_string(), 60.0));

    let text = render_text_report(&report, Utc::now());
    assert!(text.contains("Enrollment No: 2101004"));
    assert!(text.contains("Result: Fail"));
}

#[test]
fn test_cohort_chart_and_pagination() {
    let subjects = SubjectConfig::default();
    let records = load(&fixture(), &subjects).unwrap();

    let chart = cohort_chart(&records, &subjects);
    assert_eq!(chart.len(), 8);
    assert_eq!(chart[0].1, 330.0);

    let page = paginate(&records, 1);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.students.len(), 5);
    assert!(paginate(&records, 2).students.is_empty());
}

#[test]
fn test_missing_subject_columns_fail_the_load() {
    let subjects = SubjectConfig::load(&write_temp_json(
        r#"[{"name": "Data Mining", "internal": "Internal.8", "external": "External.8", "total": "Total.8"}]"#,
    ))
    .unwrap();

    let err = load(&fixture(), &subjects).unwrap_err();
    match err {
        ResultError::DataSource(DataSourceError::MissingColumns { missing }) => {
            assert_eq!(missing, vec!["Internal.8", "External.8", "Total.8"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_export_and_cache_share_the_same_cohort() {
    let cache = ResultCache::new(SubjectConfig::default());
    let records = cache.get_or_load(&fixture()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("students.csv");
    write_students_csv(&out, &ranked(&records)).unwrap();

    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 6);
    assert!(content.lines().nth(1).unwrap().starts_with("1,2101002,2,600.0"));
    assert!(content.contains("4,2101004,4,480.0,800.0,6.2,Fail"));
}

#[test]
fn test_workbook_with_offset_table() {
    // Sheet rows 1-2 are empty and the table starts in column B.
    let report = load_with_report(&workbook_fixture(), &single_subject()).unwrap();

    let ids: Vec<_> = report
        .records
        .iter()
        .map(|r| (r.enrollment_no.as_str(), r.roll_no.as_str()))
        .collect();
    assert_eq!(ids, vec![("12345", "3"), ("12346", "4")]);

    let first = &report.records[0];
    assert_eq!(first.obtained_total, Some(70.0));
    assert_eq!(first.sgpa, None);
    assert_eq!(first.subject_marks[0].internal, Some(30.0));
    assert_eq!(report.records[1].sgpa, Some(7.5));

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row, 8);
    assert_eq!(report.warnings[0].column, "SGPA V");
    assert_eq!(report.warnings[0].raw, "ABS");

    let merit = ranked(&report.records);
    assert_eq!(merit[0].student.enrollment_no, "12345");
    assert_eq!(merit[0].rank, 1);
    assert_eq!(merit[1].student.enrollment_no, "12346");
    assert_eq!(merit[1].rank, 2);
    assert_eq!(rank_of(&report.records, "12346.0").unwrap(), 2);
}

#[test]
fn test_csv_with_blank_banner_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    std::fs::write(
        &path,
        "University\n\nSemester V\nRegular\nNovember 2025\nProvisional\n\
         Enrollement No.,Roll No,Internal,External,Total,SGPA V\n\
         \n\
         1.0,1,30,40,70,ABS\n",
    )
    .unwrap();

    let report = load_with_report(&path, &single_subject()).unwrap();

    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].enrollment_no, "1");
    assert_eq!(report.records[0].subject_marks[0].total, Some(70.0));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].row, 9);
}

fn write_temp_json(content: &str) -> PathBuf {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    let (_, path) = file.keep().unwrap();
    std::fs::write(&path, content).unwrap();
    path
}
