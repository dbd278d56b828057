#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::EMPTY_CODE_THRESHOLD;

/// Matches `/* ... */` block comments, non-greedy, across lines.
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*[\s\S]*?\*/").expect("block comment pattern is valid"));

/// Matches `//` line comments that start a line or follow whitespace.
/// Group 1 keeps the whitespace in front of the marker.
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|\s)//.*$").expect("line comment pattern is valid"));

/// Matches any run of whitespace.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Removes block comments, then line comments, from JavaScript-like source.
///
/// A `//` glued to a preceding non-space character (as in `http://host`) is
/// left alone.
pub fn strip_comments(code: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(code, "");
    LINE_COMMENT
        .replace_all(&without_blocks, "$1")
        .into_owned()
}

/// Collapses whitespace runs to a single space and trims both ends.
pub fn compact_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Returns true when `code` has no real implementation: after removing
/// comments and compacting whitespace, fewer than [`EMPTY_CODE_THRESHOLD`]
/// UTF-16 code units remain.
pub fn is_effectively_empty(code: &str) -> bool {
    compact_whitespace(&strip_comments(code)).encode_utf16().count() < EMPTY_CODE_THRESHOLD
}
