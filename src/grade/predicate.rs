#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use regex::{Regex, RegexBuilder};

use super::rubric::Requirement;
use crate::assignment::CheckSpec;

/// An enum to represent possible errors when preparing a pattern.
#[derive(thiserror::Error, Debug)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("pattern `{pattern}` for check `{label}` could not be compiled: {source}")]
    Malformed {
        /// Label of the check the pattern belongs to.
        label:   String,
        /// The offending pattern.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source:  regex::Error,
    },
}

/// Compiles one pattern variant, case-insensitively.
pub fn compile_pattern(label: &str, pattern: &str) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| PatternError::Malformed {
            label: label.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// A boolean detector for one rubric requirement.
///
/// Matching runs over raw source text, so a variant can be satisfied by text
/// inside a string literal or a comment. That is a known false-positive
/// source and existing rubrics rely on it.
#[derive(Clone)]
pub struct Predicate {
    /// Label shown to the student.
    label:    String,
    /// Compiled variants; any match satisfies the predicate.
    variants: Vec<Regex>,
}

impl Predicate {
    /// Compiles every variant of `spec`.
    ///
    /// Variants that fail to compile are logged and dropped, so they never
    /// match. The remaining variants still count.
    pub fn compile(spec: &CheckSpec) -> Self {
        let variants = spec
            .patterns
            .iter()
            .filter_map(|p| match compile_pattern(&spec.label, p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!("{e}");
                    None
                }
            })
            .collect();

        Self {
            label: spec.label.clone(),
            variants,
        }
    }

    /// Returns the label shown to the student.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns true if any variant matches `source`.
    pub fn is_satisfied(&self, source: &str) -> bool {
        self.variants.iter().any(|re| re.is_match(source))
    }

    /// Runs the predicate and records the outcome as a requirement.
    pub fn evaluate(&self, source: &str) -> Requirement {
        let satisfied = self.is_satisfied(source);
        tracing::debug!(label = %self.label(), satisfied, "check evaluated");
        Requirement::new(self.label(), satisfied)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label)
            .field(
                "variants",
                &self.variants.iter().map(Regex::as_str).collect::<Vec<_>>(),
            )
            .finish()
    }
}
