//! # Diff Command Implementation
//!
//! This module implements the `diff` subcommand, which shows what a `sync`
//! with the same selection would change in the destination target.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use pbxsync::output::OutputConfig;
use pbxsync::report::{self, Detail};
use pbxsync::suggestions;
use pbxsync::sync;

use super::select::{self, SelectionArgs};

/// Show what a sync would change, without writing anything
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Show only counts per phase without listing individual files.
    #[arg(long)]
    pub summary: bool,
}

/// Execute the `diff` command.
pub fn execute(args: DiffArgs, output: &OutputConfig) -> Result<()> {
    let selection = select::resolve(&args.selection)?;

    let report = sync::preview(
        &selection.descriptor,
        &selection.source,
        &selection.destination,
        &selection.kinds,
    )
    .map_err(suggestions::explain)?;

    let detail = if args.summary {
        Detail::Summary
    } else {
        Detail::Full
    };
    print!(
        "{}",
        report::render(&report, &selection.descriptor, output, detail)
    );
    if report.is_empty() {
        println!("No changes detected.");
    }
    Ok(())
}
