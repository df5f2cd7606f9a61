use std::fmt;

use serde::{Serialize, Serializer};

/// Minimum subject total for a pass.
pub const PASS_TOTAL: f64 = 40.0;
/// Minimum internal marks for a pass.
pub const PASS_INTERNAL: f64 = 24.0;
/// Minimum external marks for a pass.
pub const PASS_EXTERNAL: f64 = 16.0;

/// Letter grade of a subject total. Variants are declared lowest first so the
/// derived ordering follows marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    /// No total recorded.
    Missing,
    Fail,
    Pass,
    C,
    B,
    BPlus,
    A,
    APlus,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Missing => "-",
            Grade::Fail => "Fail",
            Grade::Pass => "Pass",
            Grade::C => "C",
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::A => "A",
            Grade::APlus => "A+",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Pass/fail outcome of a subject or of a whole student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Pass => "Pass",
            Status::Fail => "Fail",
        })
    }
}

/// Converts a subject total into a letter grade.
///
/// | Total       | Grade |
/// |-------------|-------|
/// | >= 90       | A+    |
/// | >= 80       | A     |
/// | >= 70       | B+    |
/// | >= 60       | B     |
/// | >= 50       | C     |
/// | >= 40       | Pass  |
/// | < 40        | Fail  |
/// | missing     | -     |
pub fn grade_from_marks(total: Option<f64>) -> Grade {
    match total {
        None => Grade::Missing,
        Some(m) if m >= 90.0 => Grade::APlus,
        Some(m) if m >= 80.0 => Grade::A,
        Some(m) if m >= 70.0 => Grade::BPlus,
        Some(m) if m >= 60.0 => Grade::B,
        Some(m) if m >= 50.0 => Grade::C,
        Some(m) if m >= 40.0 => Grade::Pass,
        Some(_) => Grade::Fail,
    }
}

/// A subject passes only when the total, internal and external marks all
/// reach their minimums. Any missing component fails.
pub fn pass_fail(total: Option<f64>, internal: Option<f64>, external: Option<f64>) -> Status {
    match (total, internal, external) {
        (Some(t), Some(i), Some(e)) if t >= PASS_TOTAL && i >= PASS_INTERNAL && e >= PASS_EXTERNAL => {
            Status::Pass
        }
        _ => Status::Fail,
    }
}
