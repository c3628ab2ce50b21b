use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pathshift::commands::{self, RuleSource};
use pathshift::core::OutputFormat;

#[derive(Parser)]
#[command(name = "pathshift")]
#[command(author, version)]
#[command(
    about = "Rewrite import path prefixes across a source tree",
    long_about = "Walks a project directory and applies an ordered table of literal \
                  replacements to every .ts/.tsx file, rewriting only the files that change."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct RuleArgs {
    /// Rule file (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Replacement rule as OLD=NEW, applied in the order given
    #[arg(short, long = "rule", value_name = "OLD=NEW")]
    rules: Vec<String>,
}

impl From<RuleArgs> for RuleSource {
    fn from(args: RuleArgs) -> Self {
        RuleSource {
            config: args.config,
            rules: args.rules,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the rule table to every matching file under a directory
    Rewrite {
        /// Directory to rewrite (defaults to current directory)
        root: Option<PathBuf>,

        #[command(flatten)]
        rule_args: RuleArgs,

        /// File name suffixes to rewrite (defaults to .tsx and .ts)
        #[arg(short = 'e', long = "ext")]
        extensions: Vec<String>,

        /// Skip directories whose path contains this text (defaults to node_modules and .git)
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        /// Show what would change without writing files
        #[arg(long)]
        preview: bool,
    },

    /// Print the effective rule table and ordering warnings
    Rules {
        #[command(flatten)]
        rule_args: RuleArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pathshift=debug"
    } else {
        "pathshift=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Rewrite {
            root,
            rule_args,
            extensions,
            exclude,
            preview,
        } => {
            let options = RuleSource::from(rule_args).resolve(root, extensions, exclude)?;
            commands::rewrite::run(options, preview, cli.format)?
        }
        Commands::Rules { rule_args } => {
            commands::rules::run(&RuleSource::from(rule_args), cli.format)?
        }
    }

    Ok(())
}
