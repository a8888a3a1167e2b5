//! # Selection
//!
//! Resolves which project, targets, and phase kinds a `sync` or `diff` run
//! works on. Each choice is taken from, in order:
//!
//! 1.  the command-line flag,
//! 2.  the layered configuration (`.pbxsync.yaml`, user config),
//! 3.  an interactive prompt, when stdin and stderr are terminals.
//!
//! A choice that cannot be made non-interactively fails with a hint naming
//! the flag to pass.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};
use log::debug;

use pbxsync::config::{self, Config};
use pbxsync::defaults::DEFAULT_PHASES;
use pbxsync::discovery;
use pbxsync::id::ObjectId;
use pbxsync::model::PhaseKind;
use pbxsync::project::ProjectDescriptor;
use pbxsync::suggestions;

/// Name of the descriptor inside an `.xcodeproj` bundle.
const DESCRIPTOR_NAME: &str = "project.pbxproj";

/// Flags shared by every command that picks a source and destination.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Path to a project.pbxproj file or the .xcodeproj bundle holding it.
    ///
    /// If not provided, projects are searched for under the working directory.
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Target whose build phases are copied.
    #[arg(long, value_name = "NAME")]
    pub from: Option<String>,

    /// Target whose build phases are replaced.
    #[arg(long, value_name = "NAME")]
    pub to: Option<String>,

    /// Phase kinds to synchronize, comma-separated.
    #[arg(long, value_enum, value_delimiter = ',', conflicts_with = "all")]
    pub phases: Vec<PhaseKind>,

    /// Synchronize sources, frameworks, and resources.
    #[arg(long)]
    pub all: bool,

    /// Path to the configuration file.
    ///
    /// Defaults to .pbxsync.yaml in the working directory.
    /// Can also be set with the `PBXSYNC_CONFIG` environment variable.
    #[arg(short, long, value_name = "FILE", env = "PBXSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory searched for projects and .pbxsync.yaml.
    ///
    /// If not provided, it defaults to the current working directory.
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,
}

/// Everything a sync run needs, resolved.
#[derive(Debug)]
pub struct Selection {
    /// Path of the descriptor file.
    pub path: PathBuf,
    pub descriptor: ProjectDescriptor,
    pub source: ObjectId,
    pub destination: ObjectId,
    pub kinds: Vec<PhaseKind>,
    /// The merged configuration, for settings the caller still needs.
    pub config: Config,
}

/// Whether prompts can be shown.
pub fn interactive() -> bool {
    std::io::stdin().is_terminal() && console::user_attended_stderr()
}

/// The working directory from `--working-dir` or the process.
pub fn working_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().context("Failed to get current directory"),
    }
}

/// Resolve flags, configuration, and prompts into a [`Selection`].
pub fn resolve(args: &SelectionArgs) -> Result<Selection> {
    let working_dir = working_dir(args.working_dir.as_deref())?;
    let config = config::load_layered(&working_dir, args.config.as_deref())?;

    let path = match args.project.clone().or_else(|| config.project.clone()) {
        Some(path) => descriptor_path(&path),
        None => choose_project(&working_dir)?,
    };
    debug!("using project {}", path.display());

    let descriptor = ProjectDescriptor::load(&path).map_err(suggestions::explain)?;
    let names: Vec<String> = descriptor
        .eligible_targets()
        .map_err(suggestions::explain)?
        .iter()
        .map(|target| target.name.clone())
        .collect();

    let source_name = match args.from.clone().or_else(|| config.source.clone()) {
        Some(name) => name,
        None => choose("Source target", &names, "source target", "--from <NAME>")?,
    };
    let source = descriptor
        .find_target(&source_name)
        .map_err(suggestions::explain)?
        .id
        .clone();

    let destination_name = match args.to.clone().or_else(|| config.destination.clone()) {
        Some(name) => name,
        None => {
            let others: Vec<String> = names
                .iter()
                .filter(|name| **name != source_name)
                .cloned()
                .collect();
            choose("Destination target", &others, "destination target", "--to <NAME>")?
        }
    };
    let destination = descriptor
        .find_target(&destination_name)
        .map_err(suggestions::explain)?
        .id
        .clone();

    let kinds = if args.all {
        DEFAULT_PHASES.to_vec()
    } else if !args.phases.is_empty() {
        args.phases.clone()
    } else if let Some(phases) = config.phases.clone() {
        phases
    } else {
        choose_phases()?
    };

    Ok(Selection {
        path,
        descriptor,
        source,
        destination,
        kinds,
        config,
    })
}

/// Accept either the descriptor itself or the `.xcodeproj` bundle.
pub fn descriptor_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DESCRIPTOR_NAME)
    } else {
        path.to_path_buf()
    }
}

fn choose_project(working_dir: &Path) -> Result<PathBuf> {
    let mut projects = discovery::find_projects(working_dir)?;
    match projects.len() {
        0 => Err(suggestions::no_projects_found(working_dir)),
        1 => Ok(projects.remove(0)),
        count if !interactive() => Err(suggestions::multiple_projects(count)),
        _ => {
            let labels: Vec<String> = projects
                .iter()
                .map(|path| discovery::display_path(working_dir, path))
                .collect();
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Project")
                .items(&labels)
                .default(0)
                .interact()?;
            Ok(projects.remove(index))
        }
    }
}

fn choose(prompt: &str, items: &[String], what: &str, flag: &str) -> Result<String> {
    if !interactive() {
        return Err(suggestions::selection_required(what, flag));
    }
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?;
    Ok(items[index].clone())
}

/// The phase menu: one entry per kind, then "Everything".
fn phase_menu() -> Vec<(String, Vec<PhaseKind>)> {
    let mut menu: Vec<(String, Vec<PhaseKind>)> = PhaseKind::ALL
        .iter()
        .map(|kind| (kind.display_name().to_string(), vec![*kind]))
        .collect();
    menu.push(("Everything".to_string(), DEFAULT_PHASES.to_vec()));
    menu
}

fn choose_phases() -> Result<Vec<PhaseKind>> {
    if !interactive() {
        return Err(suggestions::selection_required(
            "phases",
            "--phases <KINDS> or --all",
        ));
    }
    let mut menu = phase_menu();
    let labels: Vec<&str> = menu.iter().map(|(label, _)| label.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Phases to synchronize")
        .items(&labels)
        .default(menu.len() - 1)
        .interact()?;
    Ok(menu.swap_remove(index).1)
}
