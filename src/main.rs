//! # pbxsync CLI
//!
//! This is the binary entry point for the `pbxsync` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Reporting top-level errors, with hints, on stderr.
//!
//! The synchronization logic lives in the `pbxsync` library crate; the
//! binary only selects what to synchronize and prints the outcome.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
