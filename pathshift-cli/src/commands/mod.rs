pub mod rewrite;
pub mod rules;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::rewrite::RewriteOptions;
use crate::rules::{ReplacementRule, RuleFile, RuleSet};

/// Where the rule table and filters come from on the command line
#[derive(Debug, Clone, Default)]
pub struct RuleSource {
    /// Optional rule file passed with `--config`
    pub config: Option<PathBuf>,

    /// `OLD=NEW` rules appended after the file's rules
    pub rules: Vec<String>,
}

impl RuleSource {
    fn load_file(&self) -> Result<RuleFile> {
        match &self.config {
            Some(path) => RuleFile::load(path)
                .with_context(|| format!("Failed to load rule file: {}", path.display())),
            None => Ok(RuleFile::default()),
        }
    }

    /// Build the ordered rule table. Falls back to the built-in table when
    /// neither the file nor the command line supplies a rule.
    fn build_rules(&self, file: &RuleFile) -> Result<RuleSet> {
        let mut rules = file.rules.clone();
        for spec in &self.rules {
            rules.push(ReplacementRule::parse(spec)?);
        }

        if rules.is_empty() {
            tracing::debug!("No rules supplied, using the built-in table");
            return Ok(RuleSet::builtin());
        }

        Ok(RuleSet::new(rules)?)
    }

    pub fn rule_set(&self) -> Result<RuleSet> {
        let file = self.load_file()?;
        self.build_rules(&file)
    }

    /// Resolve the full options. Command-line values win over the rule file,
    /// which wins over the defaults.
    pub fn resolve(
        &self,
        root: Option<PathBuf>,
        extensions: Vec<String>,
        exclude: Vec<String>,
    ) -> Result<RewriteOptions> {
        let file = self.load_file()?;
        let rules = self.build_rules(&file)?;

        let root = root
            .or_else(|| file.root.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let mut options = RewriteOptions::new(root, rules);

        if !extensions.is_empty() {
            options.extensions = extensions;
        } else if let Some(file_extensions) = file.extensions {
            options.extensions = file_extensions;
        }

        if !exclude.is_empty() {
            options.exclude = exclude;
        } else if let Some(file_exclude) = file.exclude {
            options.exclude = file_exclude;
        }

        Ok(options)
    }
}
