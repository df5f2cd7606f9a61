//! Subject-to-column configuration.
//!
//! Each configured subject names the three source columns holding its
//! internal, external, and total marks. The table is fixed for the lifetime
//! of the process; its order defines the order of subject rows and chart
//! slices everywhere downstream.
//!
//! A custom table can be supplied as a JSON file:
//! ```json
//! [
//!   { "name": "Cloud Computing", "internal": "Internal.1", "external": "External.1", "total": "Total.1" }
//! ]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ResultError;

/// Subjects of the default semester sheet, in column order.
static DEFAULT_SUBJECTS: &[&str] = &[
    "Python Programming (Theory)",
    "Cloud Computing",
    "Information Security",
    "Python Programming (Practical)",
    "Mobile App Development (Theory)",
    "Mobile App Development (Practical)",
    "Software Project Management",
    "Internship / Project – I",
];

/// Source column names for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectColumns {
    pub name: String,
    pub internal: String,
    pub external: String,
    pub total: String,
}

/// Ordered, validated subject table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectConfig {
    subjects: Vec<SubjectColumns>,
}

impl SubjectConfig {
    /// Builds a table, rejecting an empty list or repeated subject names.
    pub fn new(subjects: Vec<SubjectColumns>) -> Result<Self, ResultError> {
        if subjects.is_empty() {
            return Err(ResultError::Config("no subjects configured".to_string()));
        }

        let mut seen = HashSet::new();
        for subject in &subjects {
            if !seen.insert(subject.name.as_str()) {
                return Err(ResultError::Config(format!(
                    "duplicate subject name '{}'",
                    subject.name
                )));
            }
        }

        Ok(Self { subjects })
    }

    /// Loads the table from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ResultError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResultError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let subjects: Vec<SubjectColumns> = serde_json::from_str(&content).map_err(|e| {
            ResultError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;
        Self::new(subjects)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectColumns> {
        self.subjects.iter()
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Every source column the table refers to.
    pub fn required_columns(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().flat_map(|s| {
            [s.internal.as_str(), s.external.as_str(), s.total.as_str()].into_iter()
        })
    }
}

impl Default for SubjectConfig {
    /// The semester sheet layout: the n-th subject reads `Internal.n`,
    /// `External.n` and `Total.n`, with no suffix for the first.
    fn default() -> Self {
        let subjects = DEFAULT_SUBJECTS
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let suffix = if idx == 0 {
                    String::new()
                } else {
                    format!(".{idx}")
                };
                SubjectColumns {
                    name: (*name).to_string(),
                    internal: format!("Internal{suffix}"),
                    external: format!("External{suffix}"),
                    total: format!("Total{suffix}"),
                }
            })
            .collect();

        Self { subjects }
    }
}
