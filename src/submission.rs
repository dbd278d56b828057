#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use itertools::Itertools;

use crate::{
    assignment::{Assignment, SourceFile},
    grade::{normalize::is_effectively_empty, timeliness::FilePresence},
    util::{is_regular_file, read_text_safe},
};

/// The student files a rubric inspects, read once.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Required file path, as configured (relative to the root).
    required_path:  PathBuf,
    /// Classification of the required file.
    presence:       FilePresence,
    /// Contents of the required file; empty if absent or unreadable.
    required_code:  String,
    /// Model candidates that were looked for.
    model_searched: Vec<PathBuf>,
    /// First model candidate found, as configured.
    model_path:     Option<PathBuf>,
    /// Contents of the model file; empty if none was found.
    model_code:     String,
}

impl Submission {
    /// Locates and reads the files `assignment` names under `root`.
    ///
    /// Unreadable files read as empty so that their checks simply fail.
    pub fn locate(root: &Path, assignment: &Assignment) -> Self {
        let required_path = assignment.required_file.clone();
        let required_abs = root.join(&required_path);

        let (presence, required_code) = if is_regular_file(&required_abs) {
            let code = read_text_safe(&required_abs);
            let presence = if is_effectively_empty(&code) {
                FilePresence::Empty
            } else {
                FilePresence::Present
            };
            (presence, code)
        } else {
            (FilePresence::Absent, String::new())
        };
        tracing::info!("Required file {}: {:?}", required_path.display(), presence);

        let model_path = assignment
            .model_files
            .iter()
            .find(|p| is_regular_file(&root.join(p)))
            .cloned();
        let model_code = model_path
            .as_ref()
            .map(|p| read_text_safe(&root.join(p)))
            .unwrap_or_default();
        match &model_path {
            Some(p) => tracing::info!("Model file found: {}", p.display()),
            None => tracing::warn!("No model file found"),
        }

        Self {
            required_path,
            presence,
            required_code,
            model_searched: assignment.model_files.clone(),
            model_path,
            model_code,
        }
    }

    /// Classification of the required file.
    pub fn presence(&self) -> FilePresence {
        self.presence
    }

    /// Source text a rubric item inspects.
    pub fn source(&self, which: SourceFile) -> &str {
        match which {
            SourceFile::Required => &self.required_code,
            SourceFile::Model => &self.model_code,
        }
    }

    /// Report line describing the required file.
    pub fn required_note(&self) -> String {
        let path = self.required_path.display();
        match self.presence {
            FilePresence::Present => format!("✅ Found `{path}`."),
            FilePresence::Empty => {
                format!("⚠️ Found `{path}` but it appears empty (or only comments).")
            }
            FilePresence::Absent => format!("❌ Required file not found: `{path}`."),
        }
    }

    /// Report line describing the model file.
    pub fn model_note(&self) -> String {
        match &self.model_path {
            Some(p) => format!("✅ Model file found: `{}`", p.display()),
            None => format!(
                "⚠️ Model file not found (looked for: {})",
                self.model_searched
                    .iter()
                    .map(|p| format!("`{}`", p.display()))
                    .join(", ")
            ),
        }
    }
}
