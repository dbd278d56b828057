#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    ffi::OsString,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use which::which;

/// Finds and returns the path to the git binary
pub fn git_path() -> Result<OsString> {
    which("git")
        .map(PathBuf::into_os_string)
        .context("Cannot find git on path")
}

/// Returns true if `path` exists and is a regular file (following symlinks).
pub fn is_regular_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}

/// Reads a student file, replacing invalid UTF-8 sequences with U+FFFD.
/// Returns an empty string if the file cannot be read.
pub fn read_text_safe(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!("Could not read {}: {e}", path.display());
            String::new()
        }
    }
}

/// Appends `contents` to the file at `path`, creating it if needed.
pub fn append_to_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open {} for appending", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Could not append to {}", path.display()))
}
