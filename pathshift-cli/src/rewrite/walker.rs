use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::filters::{has_included_extension, is_excluded_dir};
use super::preview::PreviewDiff;
use super::{FileEvent, RewriteOptions, RewriteReport};
use crate::core::error::Result;

/// Walks a source tree and applies a rule table to every candidate file
pub struct TreeRewriter {
    options: RewriteOptions,
}

impl TreeRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    /// Rewrite all candidate files in place
    pub fn run(&self) -> Result<RewriteReport> {
        self.run_with(|_| {})
    }

    /// Rewrite all candidate files in place, calling `on_event` as soon as a
    /// file is updated or fails.
    ///
    /// Per-file failures are recorded and the walk continues. An error while
    /// reading the directory tree itself ends the run.
    pub fn run_with<F>(&self, mut on_event: F) -> Result<RewriteReport>
    where
        F: FnMut(&FileEvent),
    {
        let mut report = RewriteReport::new();

        self.for_each_candidate(|path| {
            report.files_scanned += 1;

            let event = match self.rewrite_file(path) {
                Ok(0) => {
                    debug!("Unchanged {}", path.display());
                    return;
                }
                Ok(replacements) => FileEvent::Updated {
                    path: path.to_path_buf(),
                    replacements,
                },
                Err(e) => FileEvent::Failed {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                },
            };

            on_event(&event);
            report.record(&event);
        })?;

        Ok(report)
    }

    /// Compute what a run would change without writing anything
    pub fn preview(&self) -> Result<Vec<PreviewDiff>> {
        let mut previews = Vec::new();

        self.for_each_candidate(|path| match fs::read_to_string(path) {
            Ok(content) => {
                let (rewritten, replacements) = self.options.rules.apply(&content);
                if replacements > 0 && rewritten != content {
                    previews.push(PreviewDiff::compute(
                        path.to_path_buf(),
                        &content,
                        &rewritten,
                        replacements,
                    ));
                }
            }
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        })?;

        Ok(previews)
    }

    /// Rewrite a single file, returning the number of replacements written.
    ///
    /// The file is only opened for writing when its content changes.
    fn rewrite_file(&self, path: &Path) -> io::Result<usize> {
        let content = fs::read_to_string(path)?;
        let (rewritten, replacements) = self.options.rules.apply(&content);

        if rewritten == content {
            return Ok(0);
        }

        fs::write(path, rewritten)?;
        Ok(replacements)
    }

    /// Visit every file under the root that passes the directory and extension filters
    fn for_each_candidate(&self, mut visit: impl FnMut(&Path)) -> Result<()> {
        let root = &self.options.root;
        if !root.exists() {
            debug!("Root {} does not exist, nothing to do", root.display());
            return Ok(());
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !(e.file_type().is_dir() && self.should_skip_dir(e.path())));

        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_file()
                && has_included_extension(entry.path(), &self.options.extensions)
            {
                visit(entry.path());
            }
        }

        Ok(())
    }

    fn should_skip_dir(&self, path: &Path) -> bool {
        let skip = is_excluded_dir(path, &self.options.exclude);
        if skip {
            debug!("Skipping directory {}", path.display());
        }
        skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ReplacementRule, RuleSet};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn rewriter(root: &Path, rules: &[(&str, &str)]) -> TreeRewriter {
        let rules = RuleSet::new(
            rules
                .iter()
                .map(|(from, to)| ReplacementRule::new(*from, *to))
                .collect(),
        )
        .unwrap();
        TreeRewriter::new(RewriteOptions::new(root.to_path_buf(), rules))
    }

    #[test]
    fn test_rewrite_file_keeps_trailing_newline() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let file_path = temp.path().join("a.ts");
        fs::write(&file_path, "import x from '@/old/x';\n\n")?;

        let replacer = rewriter(temp.path(), &[("@/old/", "@/new/")]);
        assert_eq!(replacer.rewrite_file(&file_path)?, 1);
        assert_eq!(fs::read_to_string(&file_path)?, "import x from '@/new/x';\n\n");

        Ok(())
    }

    #[test]
    fn test_rewrite_file_unchanged_returns_zero() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let file_path = temp.path().join("a.ts");
        fs::write(&file_path, "const x = 1;\n")?;

        let replacer = rewriter(temp.path(), &[("@/old/", "@/new/")]);
        assert_eq!(replacer.rewrite_file(&file_path)?, 0);

        Ok(())
    }

    #[test]
    fn test_preview_does_not_write() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let file_path = temp.path().join("a.tsx");
        fs::write(&file_path, "import '@/old/a';\nimport '@/old/b';\n")?;

        let replacer = rewriter(temp.path(), &[("@/old/", "@/new/")]);
        let previews = replacer.preview()?;

        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].replacements, 2);
        assert_eq!(previews[0].file_path, file_path);
        assert_eq!(
            fs::read_to_string(&file_path)?,
            "import '@/old/a';\nimport '@/old/b';\n"
        );

        Ok(())
    }

    #[test]
    fn test_missing_root_is_noop() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let replacer = rewriter(&temp.path().join("nope"), &[("a", "b")]);

        let report = replacer.run()?;
        assert_eq!(report.files_scanned, 0);
        assert!(report.files_updated.is_empty());
        assert!(report.errors.is_empty());

        Ok(())
    }
}
