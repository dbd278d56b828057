#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use bon::Builder;
use chrono::{DateTime, Utc};

use crate::constants::{ARTIFACTS_DIR, FALLBACK_STUDENT_ID, GIT_TIMEOUT, env};

/// Reads an environment variable, treating blank values as unset.
fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// CI environment, read once at startup and passed down explicitly.
#[derive(Debug, Clone, Default)]
pub struct CiEnv {
    /// `org/repo` of the graded repository.
    pub repository:       Option<String>,
    /// Explicit student identifier override.
    pub student_username: Option<String>,
    /// Username that triggered the run.
    pub actor:            Option<String>,
    /// CI step summary file to append the report to.
    pub step_summary:     Option<PathBuf>,
}

impl CiEnv {
    /// Snapshots the relevant environment variables.
    pub fn from_env() -> Self {
        Self {
            repository:       read_env(env::REPOSITORY),
            student_username: read_env(env::STUDENT_USERNAME),
            actor:            read_env(env::ACTOR),
            step_summary:     read_env(env::STEP_SUMMARY).map(PathBuf::from),
        }
    }

    /// Repository name without the owner, e.g. `lab-alice` for
    /// `org/lab-alice`.
    fn repo_name(&self) -> Option<&str> {
        let full = self.repository.as_deref()?;
        let name = if full.contains('/') {
            full.split('/').nth(1).unwrap_or_default()
        } else {
            full
        };
        Some(name).filter(|n| !n.is_empty())
    }

    /// Text after the last hyphen of the repository name, if it has one.
    fn repo_suffix(&self) -> Option<&str> {
        let name = self.repo_name()?;
        name.rsplit_once('-')
            .map(|(_, suffix)| suffix)
            .filter(|s| !s.is_empty())
    }

    /// Resolves the student identifier. First non-empty wins: explicit
    /// override, repository-name suffix, actor, full repository name, then
    /// `student`.
    pub fn student_id(&self) -> String {
        self.student_username
            .as_deref()
            .or_else(|| self.repo_suffix())
            .or(self.actor.as_deref())
            .or(self.repository.as_deref())
            .unwrap_or(FALLBACK_STUDENT_ID)
            .to_string()
    }
}

/// Everything a grading run needs besides the rubric.
#[derive(Debug, Clone, Builder)]
#[builder(on(PathBuf, into))]
pub struct GraderConfig {
    /// Root of the student's checkout; rubric paths are relative to it.
    #[builder(default = PathBuf::from("."))]
    root_dir:      PathBuf,
    /// Where artifacts are written. Defaults to `<root>/artifacts`.
    artifacts_dir: Option<PathBuf>,
    /// Snapshot of the CI environment.
    #[builder(default)]
    ci:            CiEnv,
    /// When the run started; only shown in the human-readable report.
    #[builder(default = Utc::now())]
    run_at:        DateTime<Utc>,
    /// Upper bound for reading the HEAD commit.
    #[builder(default = GIT_TIMEOUT)]
    git_timeout:   Duration,
    /// Also write `grade.json`.
    #[builder(default)]
    write_json:    bool,
}

impl GraderConfig {
    /// Root of the student's checkout.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory receiving `grade.csv`, `grade.json` and `feedback/`.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.artifacts_dir
            .clone()
            .unwrap_or_else(|| self.root_dir.join(ARTIFACTS_DIR))
    }

    /// Snapshot of the CI environment.
    pub fn ci(&self) -> &CiEnv {
        &self.ci
    }

    /// When the run started.
    pub fn run_at(&self) -> DateTime<Utc> {
        self.run_at
    }

    /// Upper bound for reading the HEAD commit.
    pub fn git_timeout(&self) -> Duration {
        self.git_timeout
    }

    /// Whether `grade.json` should be written.
    pub fn write_json(&self) -> bool {
        self.write_json
    }
}
