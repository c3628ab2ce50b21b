use anyhow::Result;

use super::RuleSource;
use crate::core::{OutputFormat, OutputWriter};

pub fn run(source: &RuleSource, format: OutputFormat) -> Result<()> {
    let rules = source.rule_set()?;
    let issues = rules.lint();

    OutputWriter::new(format).write_rules(&rules, &issues)
}
