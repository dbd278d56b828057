use std::path::PathBuf;

use labgrade::config::{CiEnv, GraderConfig};

fn ci(
    repository: Option<&str>,
    student_username: Option<&str>,
    actor: Option<&str>,
) -> CiEnv {
    CiEnv {
        repository:       repository.map(String::from),
        student_username: student_username.map(String::from),
        actor:            actor.map(String::from),
        step_summary:     None,
    }
}

#[test]
fn explicit_override_wins() {
    let env = ci(Some("cs-org/songs-api-alice"), Some("s1234"), Some("alice-gh"));
    assert_eq!(env.student_id(), "s1234");
}

#[test]
fn repository_suffix_after_last_hyphen() {
    let env = ci(Some("cs-org/songs-api-alice"), None, Some("alice-gh"));
    assert_eq!(env.student_id(), "alice");
}

#[test]
fn actor_when_repository_has_no_hyphen() {
    let env = ci(Some("cs-org/songs"), None, Some("alice-gh"));
    assert_eq!(env.student_id(), "alice-gh");
}

#[test]
fn trailing_hyphen_gives_no_suffix() {
    let env = ci(Some("cs-org/songs-"), None, Some("bob"));
    assert_eq!(env.student_id(), "bob");
}

#[test]
fn full_repository_name_before_literal_fallback() {
    let env = ci(Some("cs-org/songs"), None, None);
    assert_eq!(env.student_id(), "cs-org/songs");
}

#[test]
fn literal_fallback() {
    assert_eq!(CiEnv::default().student_id(), "student");
}

#[test]
fn artifacts_default_under_root() {
    let config = GraderConfig::builder()
        .root_dir(PathBuf::from("/work/submission"))
        .build();
    assert_eq!(config.artifacts_dir(), PathBuf::from("/work/submission/artifacts"));

    let config = GraderConfig::builder()
        .root_dir(PathBuf::from("/work/submission"))
        .artifacts_dir(PathBuf::from("/tmp/out"))
        .build();
    assert_eq!(config.artifacts_dir(), PathBuf::from("/tmp/out"));
}
