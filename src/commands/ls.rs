//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand.
//!
//! - Without a project, it lists the `.pbxproj` files found under the working
//!   directory.
//! - With `--project` (or `project` in the configuration), it lists the
//!   project's native targets and the number of entries in each build phase.
//!   `--files` also lists the entries.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use console::Style;

use pbxsync::config;
use pbxsync::discovery;
use pbxsync::output::{paint, OutputConfig};
use pbxsync::project::{phase_display_name, ProjectDescriptor};
use pbxsync::suggestions;

use super::select;

/// List projects, or the targets and build phases of one project
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to a project.pbxproj file or the .xcodeproj bundle holding it.
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// List the entries of every build phase.
    #[arg(short, long)]
    pub files: bool,

    /// Path to the configuration file.
    #[arg(short, long, value_name = "FILE", env = "PBXSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// The directory searched for projects.
    ///
    /// If not provided, it defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs, output: &OutputConfig) -> Result<()> {
    let working_dir = select::working_dir(args.working_dir.as_deref())?;
    let config = config::load_layered(&working_dir, args.config.as_deref())?;

    match args.project.or(config.project) {
        Some(path) => {
            let path = select::descriptor_path(&path);
            let descriptor = ProjectDescriptor::load(&path).map_err(suggestions::explain)?;
            print!("{}", render_targets(&descriptor, output, args.files));
        }
        None => print!("{}", render_projects(&working_dir)?),
    }
    Ok(())
}

fn render_projects(working_dir: &Path) -> Result<String> {
    let projects = discovery::find_projects(working_dir)?;
    if projects.is_empty() {
        return Err(suggestions::no_projects_found(working_dir));
    }
    let mut text = String::new();
    for path in &projects {
        let _ = writeln!(text, "{}", discovery::display_path(working_dir, path));
    }
    Ok(text)
}

fn render_targets(descriptor: &ProjectDescriptor, output: &OutputConfig, files: bool) -> String {
    let heading = Style::new().bold();
    let dim = Style::new().dim();
    let mut text = String::new();

    for target in descriptor.targets() {
        let _ = writeln!(text, "{}", paint(output, &heading, &target.name));
        for phase in target
            .build_phases
            .iter()
            .filter_map(|id| descriptor.phase(id))
        {
            let count = phase.files.len();
            let _ = writeln!(
                text,
                "  {}: {} {}",
                phase_display_name(phase),
                count,
                if count == 1 { "file" } else { "files" }
            );
            if files {
                for entry_id in &phase.files {
                    let name = match descriptor.registry().get(entry_id) {
                        Some(entry) => descriptor.display_name(&entry.file_ref),
                        None => format!("{} (missing build file)", entry_id),
                    };
                    let _ = writeln!(
                        text,
                        "    {} {}",
                        name,
                        paint(output, &dim, entry_id.as_str())
                    );
                }
            }
        }
    }
    text
}
