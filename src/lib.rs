//! # labgrade
//!
//! A rule-based autograder for lab submissions. It checks student source
//! files for required code patterns, awards proportional credit per rubric
//! item, classifies the submission as on time, late or missing from the HEAD
//! commit, and writes a CSV record plus a Markdown feedback report.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Declarative rubrics and the built-in lab
pub mod assignment;
/// Environment snapshot and run configuration
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Reading the HEAD commit
pub mod git;
/// For all things related to grading
pub mod grade;
/// Subprocess helpers
pub mod process;
/// Locating and reading the student's files
pub mod submission;
/// Utility functions for convenience
pub mod util;

use anyhow::{Context, Result};
use assignment::Assignment;
use config::GraderConfig;
use constants::{FEEDBACK_DIR, FEEDBACK_README, GRADE_CSV, GRADE_JSON};
use git::CommitInfo;
use grade::{GradeReport, ReportContext, RubricItem, evaluate_item, timeliness};
use submission::Submission;

/// A finished grading run: the report and its rendered forms.
#[derive(Debug, Clone)]
pub struct Assessment {
    /// Scores and status.
    pub report:   GradeReport,
    /// Contents of `grade.csv`.
    pub csv:      String,
    /// Contents of the Markdown feedback report.
    pub markdown: String,
}

/// Grades the files under the configured root against `assignment`.
///
/// `head` is the HEAD commit, or `None` if it could not be read. Nothing here
/// fails: unreadable inputs degrade to failed checks and a late status.
pub fn assess(
    config: &GraderConfig,
    assignment: &Assignment,
    head: Option<CommitInfo>,
) -> Assessment {
    let student_id = config.ci().student_id();
    tracing::info!("Grading `{}` for student `{student_id}`", assignment.lab_name);

    let submission = Submission::locate(config.root_dir(), assignment);
    let status = timeliness::evaluate(submission.presence(), head.as_ref(), &assignment.due);

    let items: Vec<RubricItem> = if submission.presence().is_missing() {
        assignment.items.iter().map(RubricItem::ungradable).collect()
    } else {
        assignment
            .items
            .iter()
            .map(|spec| evaluate_item(spec, submission.source(spec.source)))
            .collect()
    };

    let report = GradeReport::build(student_id, items, status);
    let ctx = ReportContext::builder()
        .lab_name(assignment.lab_name.clone())
        .required_note(submission.required_note())
        .model_note(submission.model_note())
        .due(assignment.due)
        .due_zone(assignment.due_zone.clone())
        .maybe_head(head)
        .run_at(config.run_at())
        .build();

    Assessment {
        csv: report.to_csv(),
        markdown: report.render_markdown(&ctx),
        report,
    }
}

/// Writes `grade.csv`, the feedback report, and optionally `grade.json`,
/// overwriting earlier runs, then appends the report to the CI step summary
/// if one is configured.
pub fn write_artifacts(config: &GraderConfig, assessment: &Assessment) -> Result<()> {
    let artifacts = config.artifacts_dir();
    let feedback = artifacts.join(FEEDBACK_DIR);
    std::fs::create_dir_all(&feedback)
        .with_context(|| format!("Could not create {}", feedback.display()))?;

    if let Some(summary) = &config.ci().step_summary {
        util::append_to_file(summary, &assessment.markdown)?;
    }

    let csv_path = artifacts.join(GRADE_CSV);
    std::fs::write(&csv_path, &assessment.csv)
        .with_context(|| format!("Could not write {}", csv_path.display()))?;

    let readme_path = feedback.join(FEEDBACK_README);
    std::fs::write(&readme_path, &assessment.markdown)
        .with_context(|| format!("Could not write {}", readme_path.display()))?;

    if config.write_json() {
        let json_path = artifacts.join(GRADE_JSON);
        let json = serde_json::to_string_pretty(&assessment.report)
            .context("Could not serialize grade report")?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("Could not write {}", json_path.display()))?;
    }

    tracing::info!("Artifacts written to {}", artifacts.display());
    Ok(())
}

/// Runs a full grading pass: read the HEAD commit, assess, and write
/// artifacts.
pub async fn grade(config: &GraderConfig, assignment: &Assignment) -> Result<Assessment> {
    let head = git::head_commit(config.root_dir(), config.git_timeout()).await;
    let assessment = assess(config, assignment, head);
    write_artifacts(config, &assessment)?;
    Ok(assessment)
}
