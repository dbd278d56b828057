#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Display;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{LATE_MARKS, ON_TIME_MARKS},
    git::CommitInfo,
};

/// What was found at the required submission path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilePresence {
    /// No regular file at the path.
    Absent,
    /// A file exists but holds only comments, whitespace or a stray token.
    Empty,
    /// A file with real content exists.
    Present,
}

impl FilePresence {
    /// Returns true unless the file holds real content.
    pub fn is_missing(self) -> bool {
        !matches!(self, FilePresence::Present)
    }
}

/// One-shot classification of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// HEAD commit at or before the due instant.
    OnTime,
    /// HEAD commit after the due instant, or its time is unknown.
    Late,
    /// Required file absent or effectively empty.
    Missing,
}

impl SubmissionStatus {
    /// Submission marks carried by this status.
    pub fn points(self) -> u32 {
        match self {
            SubmissionStatus::OnTime => ON_TIME_MARKS,
            SubmissionStatus::Late => LATE_MARKS,
            SubmissionStatus::Missing => 0,
        }
    }

    /// Numeric code written to `grade.csv`.
    pub fn code(self) -> u8 {
        match self {
            SubmissionStatus::OnTime => 0,
            SubmissionStatus::Late => 1,
            SubmissionStatus::Missing => 2,
        }
    }

    /// Human-readable reason for the submission marks.
    pub fn justification(self) -> &'static str {
        match self {
            SubmissionStatus::OnTime => "On-time submission (latest repo commit is within due)",
            SubmissionStatus::Late => "Late submission (latest repo commit is after due)",
            SubmissionStatus::Missing => "No submission detected (missing/empty required file)",
        }
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classifies a submission.
///
/// A missing or empty required file is `Missing` whatever the commit time.
/// Otherwise an unknown HEAD time is `Late`, and the due instant itself still
/// counts as on time.
pub fn evaluate(
    presence: FilePresence,
    head: Option<&CommitInfo>,
    due: &DateTime<FixedOffset>,
) -> SubmissionStatus {
    if presence.is_missing() {
        return SubmissionStatus::Missing;
    }

    match head.and_then(|c| c.epoch_millis) {
        Some(millis) if millis <= due.timestamp_millis() => SubmissionStatus::OnTime,
        Some(_) => SubmissionStatus::Late,
        None => {
            tracing::warn!("HEAD commit time unavailable; treating submission as late");
            SubmissionStatus::Late
        }
    }
}
