#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::{Deserialize, Serialize};

use super::predicate::Predicate;
use crate::assignment::ItemSpec;

/// Label of the single failed requirement given to every item when there is
/// nothing to grade.
pub const UNGRADABLE_LABEL: &str = "No submission / empty required file → cannot grade TODOs";

/// One evaluated, independently checkable expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// What was checked, as shown to the student.
    pub label:     String,
    /// Whether the check passed.
    pub satisfied: bool,
}

impl Requirement {
    /// Creates a new requirement outcome.
    pub fn new(label: impl Into<String>, satisfied: bool) -> Self {
        Self {
            label: label.into(),
            satisfied,
        }
    }
}

/// A scored rubric item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricItem {
    /// Display name, e.g. `TODO 3: POST /api/songs`.
    pub name:          String,
    /// Maximum points for this item.
    pub max_points:    u32,
    /// Requirement outcomes in rubric order.
    pub requirements:  Vec<Requirement>,
    /// Points earned, always within `0..=max_points`.
    pub earned_points: u32,
}

impl RubricItem {
    /// Number of satisfied requirements.
    pub fn satisfied_count(&self) -> usize {
        self.requirements.iter().filter(|r| r.satisfied).count()
    }

    /// An item that could not be graded at all: one failed requirement
    /// explaining why, zero points.
    pub fn ungradable(spec: &ItemSpec) -> Self {
        score_item(&spec.name, spec.max_points, vec![Requirement::new(UNGRADABLE_LABEL, false)])
    }
}

/// Awards `max_points` proportionally to the satisfied requirements.
///
/// The ratio is rounded once, half away from zero. An empty requirement list
/// scores zero.
pub fn score_item(name: &str, max_points: u32, requirements: Vec<Requirement>) -> RubricItem {
    let passed = requirements.iter().filter(|r| r.satisfied).count();
    let total = requirements.len().max(1);

    #[allow(clippy::cast_precision_loss)]
    let ratio = f64::from(max_points) * passed as f64 / total as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let earned_points = (ratio.round() as u32).min(max_points);

    RubricItem {
        name: name.to_string(),
        max_points,
        requirements,
        earned_points,
    }
}

/// Runs every check of `spec` against `source` and scores the result.
pub fn evaluate_item(spec: &ItemSpec, source: &str) -> RubricItem {
    let requirements = spec
        .checks
        .iter()
        .map(|check| Predicate::compile(check).evaluate(source))
        .collect();

    let item = score_item(&spec.name, spec.max_points, requirements);
    tracing::info!(
        "{}: {}/{} ({} of {} checks)",
        item.name,
        item.earned_points,
        item.max_points,
        item.satisfied_count(),
        item.requirements.len()
    );
    item
}
