use anyhow::Result;
use tracing::{info, warn};

use crate::core::{OutputFormat, OutputWriter};
use crate::rewrite::{RewriteOptions, TreeRewriter};

pub fn run(options: RewriteOptions, preview: bool, format: OutputFormat) -> Result<()> {
    for issue in options.rules.lint() {
        warn!("{}", issue);
    }

    info!(
        "Rewriting {} with {} rule(s)",
        options.root.display(),
        options.rules.len()
    );

    let output = OutputWriter::new(format);
    let rewriter = TreeRewriter::new(options);

    if preview {
        let diffs = rewriter.preview()?;
        output.write_previews(&diffs)?;
    } else {
        // Per-file errors are reported, not fatal
        let report = rewriter.run_with(|event| output.write_event(event))?;
        output.write_report(&report)?;
    }

    Ok(())
}
