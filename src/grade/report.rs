#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::Write;

use bon::Builder;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, object::Columns},
};

use super::{
    rubric::{Requirement, RubricItem},
    timeliness::SubmissionStatus,
};
use crate::{
    constants::{CSV_HEADER, ON_TIME_MARKS, TOTAL_MARKS, UNKNOWN},
    git::CommitInfo,
};

/// Final result of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeReport {
    /// Resolved student identifier.
    pub student_id:  String,
    /// Scored rubric items in rubric order.
    pub items:       Vec<RubricItem>,
    /// Timeliness classification.
    pub status:      SubmissionStatus,
    /// `min(100, Σ earned + submission points)`.
    pub total_score: u32,
}

impl GradeReport {
    /// Merges rubric results and timeliness into a report.
    pub fn build(
        student_id: impl Into<String>,
        items: Vec<RubricItem>,
        status: SubmissionStatus,
    ) -> Self {
        let earned: u32 = items.iter().map(|i| i.earned_points).sum();
        let total_score = (earned + status.points()).min(TOTAL_MARKS);

        Self {
            student_id: student_id.into(),
            items,
            status,
            total_score,
        }
    }

    /// Points earned on rubric items, before the submission component.
    pub fn task_points(&self) -> u32 {
        self.items.iter().map(|i| i.earned_points).sum()
    }

    /// The `grade.csv` record: fixed header plus exactly one row.
    pub fn to_csv(&self) -> String {
        format!(
            "{CSV_HEADER}\n{},{},{TOTAL_MARKS},{}\n",
            self.student_id,
            self.total_score,
            self.status.code()
        )
    }

    /// Marks breakdown rows: one per item, then submission.
    fn breakdown_rows(&self) -> Vec<MarksRow> {
        self.items
            .iter()
            .map(|i| MarksRow {
                item:  i.name.clone(),
                marks: format!("{}/{}", i.earned_points, i.max_points),
            })
            .chain(std::iter::once(MarksRow {
                item:  "Submission".to_string(),
                marks: format!("{}/{ON_TIME_MARKS}", self.status.points()),
            }))
            .collect()
    }

    /// Marks breakdown as a Markdown table with a right-aligned Marks column.
    pub fn breakdown_markdown(&self) -> String {
        let table = Table::new(self.breakdown_rows())
            .with(Style::markdown())
            .with(Modify::new(Columns::last()).with(Alignment::right()))
            .to_string();

        // tabled only pads the cells; GitHub reads alignment from the separator.
        table
            .lines()
            .enumerate()
            .map(|(i, line)| match line.strip_suffix("-|") {
                Some(rest) if i == 1 => format!("{rest}:|"),
                _ => line.to_string(),
            })
            .join("\n")
    }

    /// Marks breakdown as a boxed terminal table with the total in the
    /// footer.
    pub fn breakdown_table(&self) -> String {
        Table::new(self.breakdown_rows())
            .with(Panel::header("Grading Overview"))
            .with(Panel::footer(format!("Total: {}/{TOTAL_MARKS}", self.total_score)))
            .with(Style::modern())
            .to_string()
    }

    /// Renders the human-readable Markdown report.
    ///
    /// Pure formatting: every dynamic value comes from `self` or `ctx`.
    pub fn render_markdown(&self, ctx: &ReportContext) -> String {
        let head = ctx.head.as_ref();
        let head_field =
            |f: fn(&CommitInfo) -> String| head.map(f).unwrap_or_else(|| UNKNOWN.to_string());
        let sha = head_field(|c| c.hash.clone());
        let iso = head_field(CommitInfo::iso_time);

        let narrative = match self.status {
            SubmissionStatus::Missing => format!(
                "{}: submission marks = 0/{ON_TIME_MARKS}.",
                self.status.justification()
            ),
            SubmissionStatus::OnTime | SubmissionStatus::Late => format!(
                "{}: {}/{ON_TIME_MARKS}. (HEAD: {sha} @ {iso})",
                self.status.justification(),
                self.status.points()
            ),
        };

        let mut out = String::new();
        let _ = writeln!(out, "# Lab | {} | Autograding Summary\n", ctx.lab_name);
        let _ = writeln!(out, "- Student: `{}`", self.student_id);
        let _ = writeln!(out, "- {}", ctx.required_note);
        let _ = writeln!(out, "- {}", ctx.model_note);
        let _ = writeln!(out, "- {narrative}");
        let _ = writeln!(
            out,
            "- Due ({}): `{}`\n",
            ctx.due_zone,
            ctx.due.to_rfc3339_opts(SecondsFormat::Secs, false)
        );
        let _ = writeln!(out, "- Repo HEAD commit:");
        let _ = writeln!(out, "  - SHA: `{sha}`");
        let _ = writeln!(
            out,
            "  - Author: `{}` <{}>",
            head_field(|c| c.author_name.clone()),
            head_field(|c| c.author_email.clone())
        );
        let _ = writeln!(out, "  - Time (UTC ISO): `{iso}`\n");
        let _ = writeln!(
            out,
            "- Status: **{}** (0=on time, 1=late, 2=no submission/empty)",
            self.status.code()
        );
        let _ = writeln!(
            out,
            "- Run: `{}`\n",
            ctx.run_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        );
        let _ = writeln!(out, "## Marks Breakdown\n");
        let _ = writeln!(out, "{}\n", self.breakdown_markdown());
        let _ = writeln!(out, "## Total Marks\n");
        let _ = writeln!(out, "**{} / {TOTAL_MARKS}**\n", self.total_score);
        let _ = writeln!(out, "## Detailed Feedback");
        for item in &self.items {
            let _ = writeln!(out, "\n### {}\n{}", item.name, format_requirements(&item.requirements));
        }
        out
    }
}

/// Lists requirements as `- ✅ label` / `- ❌ label` lines.
pub fn format_requirements(requirements: &[Requirement]) -> String {
    requirements
        .iter()
        .map(|r| format!("- {} {}", if r.satisfied { "✅" } else { "❌" }, r.label))
        .join("\n")
}

/// One row of the marks breakdown.
#[derive(Tabled)]
struct MarksRow {
    #[tabled(rename = "Item")]
    /// Rubric item name, or `Submission`.
    item:  String,
    #[tabled(rename = "Marks")]
    /// `earned/max`.
    marks: String,
}

/// Context the human-readable report needs besides the scores.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct ReportContext {
    /// Lab name for the title.
    pub lab_name:      String,
    /// Note about the required file.
    pub required_note: String,
    /// Note about the model file.
    pub model_note:    String,
    /// Due instant with its offset.
    pub due:           DateTime<FixedOffset>,
    /// Name of the due date's zone.
    pub due_zone:      String,
    /// HEAD commit, if it could be read.
    pub head:          Option<CommitInfo>,
    /// When the run started.
    pub run_at:        DateTime<Utc>,
}
