#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{ffi::OsString, path::Path, time::Duration};

use anyhow::{Result, bail};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{GIT_HEAD_FORMAT, UNKNOWN},
    process::run_collect,
    util::git_path,
};

/// Snapshot of the most recent commit in the graded repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit hash.
    pub hash:         String,
    /// Commit time in milliseconds since the epoch; `None` when unreadable.
    pub epoch_millis: Option<i64>,
    /// Author name.
    pub author_name:  String,
    /// Author email.
    pub author_email: String,
    /// First line of the commit message.
    pub subject:      String,
}

impl CommitInfo {
    /// Parses one line of `git log -1 --format=%H|%ct|%an|%ae|%s` output.
    ///
    /// The subject may contain `|`; everything after the fourth separator
    /// belongs to it. Blank fields read as `unknown`, and a timestamp that is
    /// zero or not a whole number of seconds leaves `epoch_millis` empty. Returns
    /// `None` for blank input.
    pub fn parse_log_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut fields = line.splitn(5, '|');
        let hash = field_or_unknown(fields.next());
        let epoch_millis = fields
            .next()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|&secs| secs != 0)
            .and_then(|secs| secs.checked_mul(1000));
        let author_name = field_or_unknown(fields.next());
        let author_email = field_or_unknown(fields.next());
        let subject = fields.next().unwrap_or_default().to_string();

        Some(Self {
            hash,
            epoch_millis,
            author_name,
            author_email,
            subject,
        })
    }

    /// Commit time as an instant, if known.
    pub fn committed_at(&self) -> Option<DateTime<Utc>> {
        self.epoch_millis.and_then(DateTime::from_timestamp_millis)
    }

    /// Commit time as a UTC ISO-8601 string with milliseconds, or `unknown`.
    pub fn iso_time(&self) -> String {
        self.committed_at()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Trims a `git log` field, substituting `unknown` when it is blank.
fn field_or_unknown(field: Option<&str>) -> String {
    field
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Runs `git log` for the HEAD commit of the repository at `repo_dir`.
async fn read_head(repo_dir: &Path, deadline: Duration) -> Result<Option<CommitInfo>> {
    let git = git_path()?;
    let args: Vec<OsString> = ["log", "-1", GIT_HEAD_FORMAT]
        .into_iter()
        .map(OsString::from)
        .collect();

    let out = run_collect(git, &args, Some(repo_dir), Some(deadline)).await?;
    if !out.status.success() {
        bail!("git log exited with {}: {}", out.status, out.stderr_text());
    }

    Ok(CommitInfo::parse_log_line(&out.stdout_text()))
}

/// Reads the HEAD commit of the repository at `repo_dir`.
///
/// Every failure (no git binary, not a repository, no commits, timeout) is
/// logged and reported as `None`; the caller treats that as an unknown
/// commit time.
pub async fn head_commit(repo_dir: &Path, deadline: Duration) -> Option<CommitInfo> {
    match read_head(repo_dir, deadline).await {
        Ok(Some(info)) => {
            tracing::info!("HEAD commit {} at {}", info.hash, info.iso_time());
            Some(info)
        }
        Ok(None) => {
            tracing::warn!("git log returned no commits in {}", repo_dir.display());
            None
        }
        Err(e) => {
            tracing::warn!("Could not read HEAD commit in {}: {e:#}", repo_dir.display());
            None
        }
    }
}
