#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Rubrics as data. An [`Assignment`] is a declarative table of rubric items,
//! each with its maximum points, the file it inspects, and labeled pattern
//! checks. The scorer treats every assignment the same way.

/// The built-in Songs API (Mongoose CRUD) lab.
pub mod songs_api;

use std::path::{Path, PathBuf};

use bon::Builder;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Which submission file a rubric item inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFile {
    /// The required submission file.
    Required,
    /// The first model-definition file found.
    Model,
}

/// One labeled check: satisfied when any pattern variant matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct CheckSpec {
    /// Label shown to the student.
    pub label:    String,
    /// Case-insensitive regular expressions, OR-ed together.
    #[builder(with = FromIterator::from_iter)]
    pub patterns: Vec<String>,
}

/// One graded unit of the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct ItemSpec {
    /// Display name, e.g. `TODO 6: DELETE /api/songs/:id`.
    pub name:       String,
    /// Maximum points for the item.
    pub max_points: u32,
    /// File the checks run against.
    pub source:     SourceFile,
    /// Ordered checks.
    #[builder(default)]
    #[builder(with = FromIterator::from_iter)]
    pub checks:     Vec<CheckSpec>,
}

/// A complete grading configuration for one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into), on(PathBuf, into))]
pub struct Assignment {
    /// Lab name shown in the report title.
    pub lab_name:      String,
    /// Due instant, always with an explicit UTC offset.
    pub due:           DateTime<FixedOffset>,
    /// Name of the due date's zone, shown next to it in the report.
    pub due_zone:      String,
    /// Required submission file, relative to the grading root.
    pub required_file: PathBuf,
    /// Candidate model files, relative to the grading root; first match wins.
    #[builder(default)]
    #[serde(default)]
    pub model_files:   Vec<PathBuf>,
    /// Rubric items in report order.
    pub items:         Vec<ItemSpec>,
}

/// An enum to represent errors loading a rubric file.
#[derive(thiserror::Error, Debug)]
pub enum RubricError {
    /// The rubric file could not be read.
    #[error("Could not read rubric file `{path}`: {source}")]
    Read {
        /// Path of the rubric file.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The rubric file is not a valid assignment document.
    #[error("Rubric file `{path}` is not a valid assignment: {source}")]
    Parse {
        /// Path of the rubric file.
        path:   PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The rubric defines no items.
    #[error("Rubric `{0}` defines no rubric items")]
    NoItems(String),
}

impl Assignment {
    /// Parses an assignment from a JSON document. `origin` names the
    /// document in errors.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, RubricError> {
        let assignment: Assignment =
            serde_json::from_str(json).map_err(|source| RubricError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;

        if assignment.items.is_empty() {
            return Err(RubricError::NoItems(assignment.lab_name));
        }
        Ok(assignment)
    }

    /// Loads an assignment from a JSON rubric file.
    pub fn load(path: &Path) -> Result<Self, RubricError> {
        let json = std::fs::read_to_string(path).map_err(|source| RubricError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let assignment = Self::from_json(&json, path)?;
        tracing::info!(
            "Loaded rubric `{}` ({} items) from {}",
            assignment.lab_name,
            assignment.items.len(),
            path.display()
        );
        Ok(assignment)
    }

    /// Serializes the assignment as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Sum of the rubric items' maximum points.
    pub fn task_points(&self) -> u32 {
        self.items.iter().map(|i| i.max_points).sum()
    }
}
