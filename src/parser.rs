//! Normalization of a raw result grid into [`StudentRecord`]s.
//!
//! The sheet opens with banner rows, then a header row whose subject columns
//! repeat (`Internal`, `External`, `Total` once per subject). Repeated names
//! are disambiguated with `.1`, `.2`, … suffixes before the subject table is
//! applied, so the n-th `Internal` column is addressed as `Internal.n`.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::analyzers::types::{StudentRecord, SubjectMarks};
use crate::error::DataSourceError;
use crate::source::Cell;
use crate::subjects::SubjectConfig;

/// Banner rows above the header row.
pub const HEADER_SKIP_ROWS: usize = 6;

pub const ENROLLMENT_COLUMN: &str = "EnrollmentNo";
pub const ROLL_COLUMN: &str = "RollNo";

pub const OBTAINED_COLUMN: &str = "Obtain";
pub const SGPA_COLUMN: &str = "SGPA V";
pub const MAX_MARKS_COLUMN: &str = "Max Marks";
pub const CREDITS_COLUMN: &str = "T Cr";
pub const GRADE_POINTS_COLUMN: &str = "T GP";
pub const TOTAL_CP_COLUMN: &str = "Total CP";

/// Source spellings mapped onto canonical column names.
static COLUMN_ALIASES: &[(&str, &str)] = &[
    ("Enrollement No.", ENROLLMENT_COLUMN),
    ("Enrollment No.", ENROLLMENT_COLUMN),
    ("Enrollment No", ENROLLMENT_COLUMN),
    ("Roll No", ROLL_COLUMN),
    ("Roll No.", ROLL_COLUMN),
];

/// Summary columns coerced to numbers. They are optional in the sheet.
static SUMMARY_COLUMNS: &[&str] = &[
    OBTAINED_COLUMN,
    SGPA_COLUMN,
    MAX_MARKS_COLUMN,
    CREDITS_COLUMN,
    GRADE_POINTS_COLUMN,
    TOTAL_CP_COLUMN,
];

/// A cell in a numeric column that could not be read as a number.
/// The field becomes missing and the load carries on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellCoercionWarning {
    /// 1-based row number in the sheet.
    pub row: usize,
    pub column: String,
    pub raw: String,
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<StudentRecord>,
    pub warnings: Vec<CellCoercionWarning>,
}

/// Text form of an identifier cell with a trailing `.0` float artifact removed.
pub fn normalize_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

fn header_label(cell: &Cell, idx: usize) -> String {
    let label = match cell {
        Cell::Number(v) if v.fract() == 0.0 => format!("{}", *v as i64),
        other => other.to_text(),
    };
    let label = label.trim();
    if label.is_empty() {
        format!("Unnamed: {idx}")
    } else {
        label.to_string()
    }
}

/// Trimmed, de-duplicated and alias-renamed header names, in column order.
pub fn header_names(row: &[Cell]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    row.iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = header_label(cell, idx);
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{base}.{count}")
            };
            *count += 1;

            COLUMN_ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|(_, canonical)| canonical.to_string())
                .unwrap_or(name)
        })
        .collect()
}

/// Column name to position. The first column wins if two names collide.
struct ColumnIndex(HashMap<String, usize>);

impl ColumnIndex {
    fn new(names: &[String]) -> Self {
        let mut map = HashMap::new();
        for (idx, name) in names.iter().enumerate() {
            map.entry(name.clone()).or_insert(idx);
        }
        Self(map)
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}

/// Reads typed fields out of one data row, collecting coercion warnings.
struct RowReader<'a> {
    cells: &'a [Cell],
    columns: &'a ColumnIndex,
    row: usize,
    warnings: &'a mut Vec<CellCoercionWarning>,
}

impl RowReader<'_> {
    fn cell(&self, column: &str) -> &Cell {
        self.columns
            .get(column)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&Cell::Empty)
    }

    fn identifier(&self, column: &str) -> String {
        normalize_identifier(&self.cell(column).to_text())
    }

    fn number(&mut self, column: &str) -> Option<f64> {
        let cell = self.cell(column);
        let value = cell.as_number();

        if value.is_none() && !cell.is_empty() {
            let warning = CellCoercionWarning {
                row: self.row,
                column: column.to_string(),
                raw: cell.to_text(),
            };
            debug!(row = warning.row, column, raw = %warning.raw, "Non-numeric cell treated as missing");
            self.warnings.push(warning);
        }

        value
    }
}

/// Parses a raw grid into student records.
///
/// # Errors
///
/// Fails when no header row follows the banner rows, when required columns
/// are absent, or when an enrollment number repeats.
pub fn parse_grid(grid: &[Vec<Cell>], subjects: &SubjectConfig) -> Result<LoadReport, DataSourceError> {
    let header = grid.get(HEADER_SKIP_ROWS).ok_or(DataSourceError::EmptySheet {
        skipped: HEADER_SKIP_ROWS,
    })?;

    let names = header_names(header);
    let columns = ColumnIndex::new(&names);

    let missing: Vec<String> = [ENROLLMENT_COLUMN, ROLL_COLUMN]
        .into_iter()
        .chain(subjects.required_columns())
        .filter(|name| !columns.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DataSourceError::MissingColumns { missing });
    }

    for column in SUMMARY_COLUMNS {
        if !columns.contains(column) {
            warn!(column, "Summary column absent; values will be missing");
        }
    }

    let mut report = LoadReport::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (offset, cells) in grid.iter().enumerate().skip(HEADER_SKIP_ROWS + 1) {
        let row = offset + 1;

        if cells.iter().all(Cell::is_empty) {
            continue;
        }

        let mut reader = RowReader {
            cells,
            columns: &columns,
            row,
            warnings: &mut report.warnings,
        };

        let enrollment_no = reader.identifier(ENROLLMENT_COLUMN);
        if enrollment_no.is_empty() {
            debug!(row, "Row without enrollment number skipped");
            continue;
        }

        if let Some(&first_row) = first_seen.get(&enrollment_no) {
            return Err(DataSourceError::DuplicateEnrollment {
                enrollment_no,
                first_row,
                row,
            });
        }
        first_seen.insert(enrollment_no.clone(), row);

        let roll_no = reader.identifier(ROLL_COLUMN);

        let subject_marks = subjects
            .iter()
            .map(|subject| SubjectMarks {
                name: subject.name.clone(),
                internal: reader.number(&subject.internal),
                external: reader.number(&subject.external),
                total: reader.number(&subject.total),
            })
            .collect();

        report.records.push(StudentRecord {
            enrollment_no,
            roll_no,
            obtained_total: reader.number(OBTAINED_COLUMN),
            sgpa: reader.number(SGPA_COLUMN),
            max_marks: reader.number(MAX_MARKS_COLUMN),
            total_credits: reader.number(CREDITS_COLUMN),
            grade_points: reader.number(GRADE_POINTS_COLUMN),
            total_cp: reader.number(TOTAL_CP_COLUMN),
            subject_marks,
        });
    }

    Ok(report)
}
