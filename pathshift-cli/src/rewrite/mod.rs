pub mod filters;
mod preview;
mod walker;

pub use preview::{generate_preview, PreviewChange, PreviewDiff};
pub use walker::TreeRewriter;

use serde::Serialize;
use std::path::PathBuf;

use crate::rules::RuleSet;

/// Everything a rewrite run needs, fixed before the walk starts
#[derive(Debug, Clone)]
pub struct RewriteOptions {
    /// Directory to walk
    pub root: PathBuf,

    /// Ordered replacement rules
    pub rules: RuleSet,

    /// Directory path substrings to skip with their subtree
    pub exclude: Vec<String>,

    /// File name suffixes that are candidates for rewriting
    pub extensions: Vec<String>,
}

impl RewriteOptions {
    /// Options with the default `.ts`/`.tsx` filter and `node_modules`/`.git` exclusions
    pub fn new(root: PathBuf, rules: RuleSet) -> Self {
        Self {
            root,
            rules,
            exclude: filters::DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            extensions: filters::DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Outcome for a single file that produced output
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FileEvent {
    Updated { path: PathBuf, replacements: usize },
    Failed { path: PathBuf, error: String },
}

/// A file that could not be read or written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileError {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a rewrite run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RewriteReport {
    /// Candidate files visited
    pub files_scanned: usize,

    /// Total literal replacements written
    pub replacements_made: usize,

    /// Files that were rewritten, in visit order
    pub files_updated: Vec<PathBuf>,

    /// Per-file failures, in visit order
    pub errors: Vec<FileError>,
}

impl RewriteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &FileEvent) {
        match event {
            FileEvent::Updated { path, replacements } => {
                self.replacements_made += replacements;
                self.files_updated.push(path.clone());
            }
            FileEvent::Failed { path, error } => {
                self.errors.push(FileError {
                    path: path.clone(),
                    error: error.clone(),
                });
            }
        }
    }
}
