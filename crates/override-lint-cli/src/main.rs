//! override-lint CLI tool.
//!
//! Usage:
//! ```bash
//! override-lint check [OPTIONS] [PATH]
//! override-lint list-rules
//! override-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use override_lint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Requires an override-marker decorator on public methods of Python classes
#[derive(Parser)]
#[command(name = "override-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "OVERRIDE_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// File or directory to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules, by name or code (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Lowest severity that fails the run (overrides `fail_on` in config)
        #[arg(long)]
        fail_on: Option<Severity>,

        /// Abort on the first file that fails to parse instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Rendered diagnostics with source snippets.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One line per violation, `path:line:col: CODE message`.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            fail_on,
            strict,
        } => {
            let options = commands::check::CheckOptions {
                format,
                rules,
                exclude,
                fail_on,
                strict,
            };
            let failed = commands::check::run(&path, cli.config.as_deref(), &options)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
