use std::{fs, path::PathBuf, process::Command, time::Duration};

use chrono::DateTime;
use labgrade::{
    assignment::songs_api::{self, DUE_ISO, REQUIRED_SERVER_PATH},
    config::GraderConfig,
    git::{CommitInfo, head_commit},
    grade::timeliness::{self, FilePresence, SubmissionStatus},
};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("labgrade-git-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn parses_all_five_fields() {
    let info = CommitInfo::parse_log_line(
        "9f1c2e3d4b5a69788796a5b4c3d2e1f009182736|1763585940|Alice Example|alice@example.com|Add \
         DELETE route\n",
    )
    .expect("commit");

    assert_eq!(info.hash, "9f1c2e3d4b5a69788796a5b4c3d2e1f009182736");
    assert_eq!(info.epoch_millis, Some(1_763_585_940_000));
    assert_eq!(info.author_name, "Alice Example");
    assert_eq!(info.author_email, "alice@example.com");
    assert_eq!(info.subject, "Add DELETE route");
    assert_eq!(info.iso_time(), "2025-11-19T20:59:00.000Z");
}

#[test]
fn subject_keeps_pipes() {
    let info = CommitInfo::parse_log_line("abc|1700000000|a|a@x.org|fix: a | b | c").expect("commit");
    assert_eq!(info.subject, "fix: a | b | c");
}

#[test]
fn unparsable_time_is_unknown() {
    let info = CommitInfo::parse_log_line("abc|not-a-number|a|a@x.org|msg").expect("commit");
    assert_eq!(info.epoch_millis, None);
    assert_eq!(info.iso_time(), "unknown");

    let info = CommitInfo::parse_log_line("abc").expect("commit");
    assert_eq!(info.epoch_millis, None);
    assert_eq!(info.author_name, "unknown");
    assert_eq!(info.author_email, "unknown");
    assert_eq!(info.subject, "");
}

#[test]
fn zero_commit_time_is_unknown_and_late() {
    let info = CommitInfo::parse_log_line("abc|0|a|b|s").expect("commit");
    assert_eq!(info.epoch_millis, None);
    assert_eq!(info.iso_time(), "unknown");

    let due = DateTime::parse_from_rfc3339(DUE_ISO).expect("due");
    assert_eq!(
        timeliness::evaluate(FilePresence::Present, Some(&info), &due),
        SubmissionStatus::Late
    );
}

#[test]
fn blank_output_is_no_commit() {
    assert!(CommitInfo::parse_log_line("").is_none());
    assert!(CommitInfo::parse_log_line("  \n").is_none());
}

#[tokio::test]
async fn directory_without_repository_has_no_head() {
    let root = temp_root();
    assert!(head_commit(&root, Duration::from_secs(10)).await.is_none());
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn reads_head_commit_from_git() {
    if which::which("git").is_err() {
        eprintln!("git not on path; skipping");
        return;
    }

    let root = temp_root();
    let git = |args: &[&str]| {
        let out = Command::new("git")
            .args(["-c", "user.name=Test Student", "-c", "user.email=student@example.com"])
            .args(args)
            .current_dir(&root)
            .env("GIT_COMMITTER_DATE", DUE_ISO)
            .env("GIT_AUTHOR_DATE", DUE_ISO)
            .output()
            .expect("run git");
        assert!(out.status.success(), "git {args:?}: {}", String::from_utf8_lossy(&out.stderr));
    };
    git(&["init", "-q"]);
    git(&["commit", "-q", "--allow-empty", "-m", "Submit lab | final"]);

    let info = head_commit(&root, Duration::from_secs(10))
        .await
        .expect("head commit");
    let due = DateTime::parse_from_rfc3339(DUE_ISO).expect("due");

    assert_eq!(info.hash.len(), 40);
    assert_eq!(info.epoch_millis, Some(due.timestamp_millis()));
    assert_eq!(info.author_name, "Test Student");
    assert_eq!(info.author_email, "student@example.com");
    assert_eq!(info.subject, "Submit lab | final");

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn full_run_over_a_committed_checkout() {
    if which::which("git").is_err() {
        eprintln!("git not on path; skipping");
        return;
    }

    let root = temp_root();
    let fixture = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/songs-api/complete");
    for rel in [REQUIRED_SERVER_PATH, "server/models/song.model.js"] {
        let dest = root.join(rel);
        fs::create_dir_all(dest.parent().expect("parent")).expect("create dirs");
        fs::copy(fixture.join(rel), &dest).expect("copy fixture");
    }

    let git = |args: &[&str]| {
        let out = Command::new("git")
            .args(["-c", "user.name=Test Student", "-c", "user.email=student@example.com"])
            .args(args)
            .current_dir(&root)
            .env("GIT_COMMITTER_DATE", "2025-11-18T12:00:00+03:00")
            .env("GIT_AUTHOR_DATE", "2025-11-18T12:00:00+03:00")
            .output()
            .expect("run git");
        assert!(out.status.success(), "git {args:?}: {}", String::from_utf8_lossy(&out.stderr));
    };
    git(&["init", "-q"]);
    git(&["add", "-A"]);
    git(&["commit", "-q", "-m", "Finish songs API"]);

    let config = GraderConfig::builder().root_dir(root.clone()).build();
    let assessment = labgrade::grade(&config, &songs_api::assignment())
        .await
        .expect("grading succeeds");

    assert_eq!(assessment.report.status, SubmissionStatus::OnTime);
    assert_eq!(assessment.report.total_score, 100);
    assert!(
        assessment
            .markdown
            .contains("  - Author: `Test Student` <student@example.com>")
    );
    let csv = fs::read_to_string(root.join("artifacts/grade.csv")).expect("grade.csv");
    assert!(csv.ends_with(",100,100,0\n"));
    assert!(root.join("artifacts/feedback/README.md").is_file());

    let _ = fs::remove_dir_all(root);
}
