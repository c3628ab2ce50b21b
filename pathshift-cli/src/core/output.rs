use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::rewrite::{generate_preview, FileEvent, PreviewDiff, RewriteReport};
use crate::rules::{ReplacementRule, RuleIssue, RuleSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Console line for a file event: `Updated <path>` or `Error processing <path>: <error>`
pub fn format_event(event: &FileEvent) -> String {
    match event {
        FileEvent::Updated { path, .. } => format!("Updated {}", path.display()),
        FileEvent::Failed { path, error } => {
            format!("Error processing {}: {}", path.display(), error)
        }
    }
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a file event as it happens. JSON output waits for the full report.
    pub fn write_event(&self, event: &FileEvent) {
        if self.format == OutputFormat::Text {
            println!("{}", format_event(event));
        }
    }

    /// Print the final report. In text mode the per-file lines already went
    /// to stdout, so only the summary is logged.
    pub fn write_report(&self, report: &RewriteReport) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Text => {
                info!("{}", summary_line(report));
            }
        }
        Ok(())
    }

    pub fn write_previews(&self, diffs: &[PreviewDiff]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(diffs)?);
            }
            OutputFormat::Text => {
                if diffs.is_empty() {
                    println!("No matches found.");
                } else {
                    println!("{}", generate_preview(diffs));
                    println!("Run without --preview to apply changes");
                }
            }
        }
        Ok(())
    }

    pub fn write_rules(&self, rules: &RuleSet, issues: &[RuleIssue]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                let response = RulesResponse {
                    rules: rules.rules(),
                    issues,
                };
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            OutputFormat::Text => {
                print!("{}", format_rules(rules, issues));
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RulesResponse<'a> {
    rules: &'a [ReplacementRule],
    issues: &'a [RuleIssue],
}

/// One-line run summary
pub fn summary_line(report: &RewriteReport) -> String {
    format!(
        "Done: {} file{} scanned, {} updated, {} replacement{}, {} error{}",
        report.files_scanned,
        plural(report.files_scanned),
        report.files_updated.len(),
        report.replacements_made,
        plural(report.replacements_made),
        report.errors.len(),
        plural(report.errors.len()),
    )
}

/// Numbered rule table followed by any lint warnings
pub fn format_rules(rules: &RuleSet, issues: &[RuleIssue]) -> String {
    let mut output = String::new();
    for (i, rule) in rules.rules().iter().enumerate() {
        output.push_str(&format!("{:>3}. {}\n", i + 1, rule));
    }
    if !issues.is_empty() {
        output.push_str("\nWarnings:\n");
        for issue in issues {
            output.push_str(&format!("  {}\n", issue));
        }
    }
    output
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::FileError;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    fn sample_report() -> RewriteReport {
        let mut report = RewriteReport::new();
        report.files_scanned = 3;
        report.record(&FileEvent::Updated {
            path: PathBuf::from("src/app/cart.tsx"),
            replacements: 2,
        });
        report.record(&FileEvent::Failed {
            path: PathBuf::from("src/bad.ts"),
            error: "denied".to_string(),
        });
        report
    }

    #[test]
    fn test_format_event_lines() {
        let updated = FileEvent::Updated {
            path: PathBuf::from("src/app/cart.tsx"),
            replacements: 2,
        };
        assert_eq!(format_event(&updated), "Updated src/app/cart.tsx");

        let failed = FileEvent::Failed {
            path: PathBuf::from("src/bad.ts"),
            error: "stream did not contain valid UTF-8".to_string(),
        };
        assert_eq!(
            format_event(&failed),
            "Error processing src/bad.ts: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(&sample_report()),
            "Done: 3 files scanned, 1 updated, 2 replacements, 1 error"
        );
        assert_eq!(
            summary_line(&RewriteReport::new()),
            "Done: 0 files scanned, 0 updated, 0 replacements, 0 errors"
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = sample_report();
        assert_eq!(
            report.errors,
            vec![FileError {
                path: PathBuf::from("src/bad.ts"),
                error: "denied".to_string(),
            }]
        );
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "files_scanned": 3,
                "replacements_made": 2,
                "files_updated": ["src/app/cart.tsx"],
                "errors": [{"path": "src/bad.ts", "error": "denied"}]
            })
        );
    }

    #[test]
    fn test_format_rules_with_warnings() {
        let rules = RuleSet::new(vec![
            ReplacementRule::new("@/a/", "@/b/"),
            ReplacementRule::new("@/a/x", "@/c/x"),
        ])
        .unwrap();
        let issues = rules.lint();

        assert_eq!(
            format_rules(&rules, &issues),
            concat!(
                "  1. @/a/ -> @/b/\n",
                "  2. @/a/x -> @/c/x\n",
                "\nWarnings:\n",
                "  rule #2 can never match: rule #1 rewrites its pattern first\n",
            )
        );
        assert_eq!(format_rules(&rules, &[]).lines().count(), 2);
    }

    #[test]
    fn test_rules_json_shape() {
        let rules = RuleSet::new(vec![ReplacementRule::new("lib", "src/lib")]).unwrap();
        let issues = rules.lint();
        let response = RulesResponse {
            rules: rules.rules(),
            issues: &issues,
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "rules": [{"from": "lib", "to": "src/lib"}],
                "issues": [{"kind": "reintroduces", "rule": 0, "pattern_of": 0}]
            })
        );
    }
}
