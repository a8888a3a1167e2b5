//! # Sync Command Implementation
//!
//! This module implements the `sync` subcommand, which mirrors the chosen
//! build phases of a source target onto a destination target and writes the
//! project back to disk.
//!
//! ## Process
//!
//! 1.  **Selection**: project, targets, and phase kinds come from flags, the
//!     configuration, or prompts (see `select`).
//! 2.  **Synchronization**: every requested kind is resynced in memory.
//! 3.  **Report**: the added, removed, and changed files are printed.
//! 4.  **Write**: unless `--dry-run` is given, the original descriptor is
//!     renamed to its backup path and the new one is written.
//!
//! Nothing is written when synchronization fails part way.

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};
use log::info;

use pbxsync::output::{emoji, OutputConfig};
use pbxsync::persist;
use pbxsync::report::{self, Detail};
use pbxsync::suggestions;
use pbxsync::sync;

use super::select::{self, SelectionArgs};

/// Mirror the build phases of one target onto another
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Show what would change without writing the project.
    #[arg(long)]
    pub dry_run: bool,

    /// Do not keep a backup of the original project file.
    #[arg(long)]
    pub no_backup: bool,

    /// Suffix for the backup file name (default: .orig).
    #[arg(long, value_name = "SUFFIX")]
    pub backup_suffix: Option<String>,

    /// Write without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Print only errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, output: &OutputConfig) -> Result<()> {
    let mut selection = select::resolve(&args.selection)?;

    let report = sync::synchronize(
        &mut selection.descriptor,
        &selection.source,
        &selection.destination,
        &selection.kinds,
    )
    .map_err(suggestions::explain)?;

    if !args.quiet {
        print!(
            "{}",
            report::render(&report, &selection.descriptor, output, Detail::Full)
        );
    }

    if args.dry_run {
        if !args.quiet {
            println!(
                "{} Dry run: {} was not modified",
                emoji(output, "🔍", "[DRY RUN]"),
                selection.path.display()
            );
        }
        return Ok(());
    }

    if !args.yes && select::interactive() {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Write changes to {}?", selection.path.display()))
            .default(true)
            .interact()?;
        if !proceed {
            println!("Aborted. {} was not modified.", selection.path.display());
            return Ok(());
        }
    }

    let backup_enabled = !args.no_backup && selection.config.backup_enabled();
    let suffix = args
        .backup_suffix
        .as_deref()
        .unwrap_or_else(|| selection.config.backup_suffix());
    let backup = persist::save(
        &selection.descriptor,
        &selection.path,
        backup_enabled.then_some(suffix),
    )?;
    info!("wrote {}", selection.path.display());

    if !args.quiet {
        println!(
            "{} Synchronized '{}' -> '{}' in {}",
            emoji(output, "✅", "[OK]"),
            report.source,
            report.destination,
            selection.path.display()
        );
        if let Some(backup) = backup {
            println!(
                "{} Original saved as {}",
                emoji(output, "💾", "[BACKUP]"),
                backup.display()
            );
        }
    }

    Ok(())
}
