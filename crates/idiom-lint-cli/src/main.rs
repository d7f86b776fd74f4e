//! idiom-lint CLI tool.
//!
//! Usage:
//! ```bash
//! idiom-lint check [FILES...]
//! idiom-lint show --builtin
//! ```

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod resolver;

/// Linter configuration tool: validate and inspect rewrite-rule documents
#[derive(Parser)]
#[command(name = "idiom-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate rule documents and summarize what they assemble to
    Check {
        /// Rule documents to load, in order; discovered when omitted
        files: Vec<PathBuf>,
    },

    /// Print every assembled setting
    Show {
        /// Rule documents to load, in order
        files: Vec<PathBuf>,

        /// Load the built-in ruleset ahead of the files
        #[arg(long)]
        builtin: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for assembled settings.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check { files } => commands::check::run(&files),
        Commands::Show {
            files,
            builtin,
            format,
        } => commands::show::run(&files, builtin, format),
    }
}
