use serde::Serialize;
use similar::{DiffTag, TextDiff};
use std::path::PathBuf;

/// A run of changed lines in a file
#[derive(Debug, Clone, Serialize)]
pub struct PreviewChange {
    /// First changed line in the original file (1-indexed)
    pub line: usize,

    /// Original text of the changed lines
    pub original: String,

    /// Rewritten text of the changed lines
    pub replacement: String,
}

/// Preview of all changes in a single file
#[derive(Debug, Clone, Serialize)]
pub struct PreviewDiff {
    /// File path
    pub file_path: PathBuf,

    /// Number of literal replacements the rules would make
    pub replacements: usize,

    /// Changed line runs
    pub changes: Vec<PreviewChange>,
}

impl PreviewDiff {
    /// Diff `original` against `rewritten` line by line
    pub fn compute(
        file_path: PathBuf,
        original: &str,
        rewritten: &str,
        replacements: usize,
    ) -> Self {
        let diff = TextDiff::from_lines(original, rewritten);
        let old_lines = diff.old_slices();
        let new_lines = diff.new_slices();
        let mut changes = Vec::new();

        for op in diff.ops() {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            if tag == DiffTag::Equal {
                continue;
            }

            changes.push(PreviewChange {
                line: old_range.start + 1,
                original: join_lines(&old_lines[old_range]),
                replacement: join_lines(&new_lines[new_range]),
            });
        }

        Self {
            file_path,
            replacements,
            changes,
        }
    }

    /// Generate a human-readable diff output
    pub fn format_diff(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.file_path.display()));
        output.push_str(&format!(
            "   {} replacement{}\n\n",
            self.replacements,
            if self.replacements == 1 { "" } else { "s" }
        ));

        for (i, change) in self.changes.iter().enumerate() {
            output.push_str(&format!("  line {}\n", change.line));
            for line in change.original.lines() {
                output.push_str(&format!("  - {}\n", line));
            }
            for line in change.replacement.lines() {
                output.push_str(&format!("  + {}\n", line));
            }
            if i < self.changes.len() - 1 {
                output.push('\n');
            }
        }

        output
    }
}

fn join_lines(lines: &[&str]) -> String {
    lines.concat().trim_end_matches(['\n', '\r']).to_string()
}

/// Generate preview for all files
pub fn generate_preview(diffs: &[PreviewDiff]) -> String {
    let mut output = String::new();

    let total_files = diffs.len();
    let total_replacements: usize = diffs.iter().map(|d| d.replacements).sum();

    output.push_str("========================================\n");
    output.push_str("           PREVIEW CHANGES\n");
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "{} file{}, {} replacement{}\n\n",
        total_files,
        if total_files == 1 { "" } else { "s" },
        total_replacements,
        if total_replacements == 1 { "" } else { "s" }
    ));

    for (i, diff) in diffs.iter().enumerate() {
        output.push_str(&diff.format_diff());
        if i < diffs.len() - 1 {
            output.push_str("\n----------------------------------------\n\n");
        }
    }

    output.push_str("\n========================================\n");
    output
}
