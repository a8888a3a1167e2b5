//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use pbxsync::output::{ColorWhen, OutputConfig};

use crate::commands;

/// pbxsync - Mirror the build phases of one Xcode target onto another
#[derive(Parser, Debug)]
#[command(name = "pbxsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Mirror the build phases of one target onto another
    Sync(commands::sync::SyncArgs),
    /// Show what a sync would change, without writing anything
    Diff(commands::diff::DiffArgs),
    /// List projects, or the targets and build phases of one project
    Ls(commands::ls::LsArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level)?;
        let output = OutputConfig::new(self.color);

        match self.command {
            Commands::Sync(args) => commands::sync::execute(args, &output),
            Commands::Diff(args) => commands::diff::execute(args, &output),
            Commands::Ls(args) => commands::ls::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initialize `env_logger` at `level`. `RUST_LOG`, when set, takes precedence.
fn init_logging(level: &str) -> Result<()> {
    let filter = parse_level(level)?;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(filter).format_timestamp(None);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    // A logger may already be installed when running under tests.
    let _ = builder.try_init();
    Ok(())
}

fn parse_level(level: &str) -> Result<LevelFilter> {
    level.parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid log level: {level}\n\n\
             hint: Use one of: off, error, warn, info, debug, trace"
        )
    })
}
