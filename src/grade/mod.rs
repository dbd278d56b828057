#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Comment stripping and the "effectively empty" heuristic.
pub mod normalize;
/// Pattern-based requirement detectors.
pub mod predicate;
/// Grade report aggregation and rendering.
pub mod report;
/// Requirement outcomes and proportional item scoring.
pub mod rubric;
/// On-time / late / missing classification.
pub mod timeliness;

pub use normalize::is_effectively_empty;
pub use predicate::{PatternError, Predicate};
pub use report::{GradeReport, ReportContext};
pub use rubric::{Requirement, RubricItem, evaluate_item, score_item};
pub use timeliness::{FilePresence, SubmissionStatus};

pub use crate::git::CommitInfo;
