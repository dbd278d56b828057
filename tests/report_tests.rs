use chrono::{DateTime, Utc};
use labgrade::{
    assignment::songs_api::DUE_ISO,
    git::CommitInfo,
    grade::{
        report::{GradeReport, ReportContext, format_requirements},
        rubric::{Requirement, RubricItem, score_item},
        timeliness::SubmissionStatus,
    },
};

fn item(name: &str, max: u32, passed: usize, total: usize) -> RubricItem {
    let reqs = (0..total)
        .map(|i| Requirement::new(format!("{name} check {i}"), i < passed))
        .collect();
    score_item(name, max, reqs)
}

fn full_marks() -> Vec<RubricItem> {
    vec![
        item("TODO 2: Schema & Model (Song)", 15, 8, 8),
        item("TODO 3: POST /api/songs", 15, 6, 6),
        item("TODO 4: GET /api/songs", 15, 7, 7),
        item("TODO 5: PUT /api/songs/:id", 15, 6, 6),
        item("TODO 6: DELETE /api/songs/:id", 20, 4, 4),
    ]
}

fn context(head: Option<CommitInfo>) -> ReportContext {
    ReportContext::builder()
        .lab_name("songs-api-mongoose-crud")
        .required_note("✅ Found `7-2-restful-api/server/index.js`.")
        .model_note("✅ Model file found: `server/models/song.model.js`")
        .due(DateTime::parse_from_rfc3339(DUE_ISO).expect("due"))
        .due_zone("Riyadh")
        .maybe_head(head)
        .run_at(
            DateTime::parse_from_rfc3339("2025-11-20T08:00:00Z")
                .expect("run time")
                .with_timezone(&Utc),
        )
        .build()
}

fn head() -> CommitInfo {
    CommitInfo {
        hash:         "9f1c2e3d4b5a69788796a5b4c3d2e1f009182736".into(),
        epoch_millis: Some(1_763_585_940_000),
        author_name:  "Alice Example".into(),
        author_email: "alice@example.com".into(),
        subject:      "Add DELETE route".into(),
    }
}

#[test]
fn total_is_capped_at_one_hundred() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::OnTime);
    assert_eq!(report.task_points(), 80);
    assert_eq!(report.total_score, 100);

    let bonus = vec![item("Bonus", 50, 1, 1), item("Extra", 45, 1, 1)];
    let capped = GradeReport::build("alice", bonus, SubmissionStatus::OnTime);
    assert_eq!(capped.total_score, 100);
}

#[test]
fn total_adds_submission_points() {
    let items = vec![item("TODO 3: POST /api/songs", 15, 4, 6)];
    assert_eq!(GradeReport::build("a", items.clone(), SubmissionStatus::OnTime).total_score, 30);
    assert_eq!(GradeReport::build("a", items.clone(), SubmissionStatus::Late).total_score, 20);
    assert_eq!(GradeReport::build("a", items, SubmissionStatus::Missing).total_score, 10);
}

#[test]
fn csv_has_fixed_header_and_one_row() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::Late);
    assert_eq!(
        report.to_csv(),
        "student_username,obtained_marks,total_marks,status\nalice,90,100,1\n"
    );
}

#[test]
fn requirements_render_with_markers() {
    let reqs = [
        Requirement::new("Uses Song.find()", true),
        Requirement::new("Sorts newest first (createdAt desc)", false),
    ];
    assert_eq!(
        format_requirements(&reqs),
        "- ✅ Uses Song.find()\n- ❌ Sorts newest first (createdAt desc)"
    );
}

#[test]
fn markdown_lists_every_section() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::OnTime);
    let md = report.render_markdown(&context(Some(head())));

    assert!(md.starts_with("# Lab | songs-api-mongoose-crud | Autograding Summary\n"));
    assert!(md.contains("- Student: `alice`"));
    assert!(md.contains("- ✅ Found `7-2-restful-api/server/index.js`."));
    assert!(md.contains(
        "- On-time submission (latest repo commit is within due): 20/20. (HEAD: \
         9f1c2e3d4b5a69788796a5b4c3d2e1f009182736 @ 2025-11-19T20:59:00.000Z)"
    ));
    assert!(md.contains("- Due (Riyadh): `2025-11-19T23:59:00+03:00`"));
    assert!(md.contains("  - Author: `Alice Example` <alice@example.com>"));
    assert!(md.contains("- Status: **0** (0=on time, 1=late, 2=no submission/empty)"));
    assert!(md.contains("- Run: `2025-11-20T08:00:00.000Z`"));
    assert!(md.contains("## Marks Breakdown"));
    assert!(md.contains("TODO 6: DELETE /api/songs/:id"));
    assert!(md.contains("20/20"));
    assert!(md.contains("| Submission"));
    assert!(md.contains("## Total Marks\n\n**100 / 100**"));
    assert!(md.contains("### TODO 4: GET /api/songs\n- ✅ TODO 4: GET /api/songs check 0"));
    assert!(md.ends_with("- ✅ TODO 6: DELETE /api/songs/:id check 3\n"));
}

#[test]
fn markdown_without_head_says_unknown() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::Late);
    let md = report.render_markdown(&context(None));

    assert!(md.contains("(HEAD: unknown @ unknown)"));
    assert!(md.contains("  - SHA: `unknown`"));
    assert!(md.contains("  - Author: `unknown` <unknown>"));
    assert!(md.contains("  - Time (UTC ISO): `unknown`"));
}

#[test]
fn missing_submission_narrative() {
    let report = GradeReport::build("alice", Vec::new(), SubmissionStatus::Missing);
    let md = report.render_markdown(&context(None));
    assert!(md.contains(
        "- No submission detected (missing/empty required file): submission marks = 0/20."
    ));
    assert!(md.contains("**0 / 100**"));
}

#[test]
fn breakdown_table_has_one_row_per_item_plus_submission() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::OnTime);
    let table = report.breakdown_markdown();
    let rows: Vec<&str> = table.lines().collect();
    // header, separator, five items, submission
    assert_eq!(rows.len(), 8);
    assert!(rows[0].contains("Item") && rows[0].contains("Marks"));
    assert!(rows[7].contains("Submission") && rows[7].contains("20/20"));
    assert!(rows[1].starts_with("|-"));
    assert!(rows[1].ends_with("-:|"));
    assert_eq!(rows[1].matches(':').count(), 1);

    let boxed = report.breakdown_table();
    assert!(boxed.contains("Grading Overview"));
    assert!(boxed.contains("Total: 100/100"));
}

#[test]
fn report_serializes_status_in_snake_case() {
    let report = GradeReport::build("alice", full_marks(), SubmissionStatus::OnTime);
    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(value["status"], "on_time");
    assert_eq!(value["total_score"], 100);
    assert_eq!(value["items"].as_array().map(Vec::len), Some(5));
}
