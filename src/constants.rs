#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::time::Duration;

/// Maximum marks for a lab, including the submission component.
pub const TOTAL_MARKS: u32 = 100;

/// Submission marks awarded for a commit at or before the due instant.
pub const ON_TIME_MARKS: u32 = 20;

/// Submission marks awarded for a late (or unverifiable) commit.
pub const LATE_MARKS: u32 = 10;

/// Normalized sources shorter than this many characters count as empty.
pub const EMPTY_CODE_THRESHOLD: usize = 10;

/// Exact header line of `grade.csv`. Downstream collectors depend on it.
pub const CSV_HEADER: &str = "student_username,obtained_marks,total_marks,status";

/// Default artifacts directory, relative to the grading root.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Feedback directory, relative to the artifacts directory.
pub const FEEDBACK_DIR: &str = "feedback";

/// File name of the CSV grade record.
pub const GRADE_CSV: &str = "grade.csv";

/// File name of the JSON grade record.
pub const GRADE_JSON: &str = "grade.json";

/// File name of the human-readable report inside the feedback directory.
pub const FEEDBACK_README: &str = "README.md";

/// Student identifier used when nothing else resolves.
pub const FALLBACK_STUDENT_ID: &str = "student";

/// Pretty format handed to `git log` for the HEAD commit.
/// Fields: hash, committer time (unix seconds), author name, author email,
/// subject.
pub const GIT_HEAD_FORMAT: &str = "--format=%H|%ct|%an|%ae|%s";

/// How long the HEAD commit lookup may take before it is abandoned.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Placeholder for commit metadata that could not be read.
pub const UNKNOWN: &str = "unknown";

/// Environment variable names read at startup.
pub mod env {
    /// `org/repo` of the repository being graded.
    pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
    /// Explicit student identifier override.
    pub const STUDENT_USERNAME: &str = "STUDENT_USERNAME";
    /// Username that triggered the CI run.
    pub const ACTOR: &str = "GITHUB_ACTOR";
    /// Path of the CI step summary file, appended to when set.
    pub const STEP_SUMMARY: &str = "GITHUB_STEP_SUMMARY";
}
