//! # Configuration
//!
//! Optional YAML configuration that pre-fills the choices the CLI would
//! otherwise prompt for. Two layers are read and merged, later layers
//! overriding earlier ones field by field:
//!
//! 1.  **User config**: `config.yaml` in the platform config directory
//!     (`~/.config/pbxsync/` on Linux, `~/Library/Application Support/pbxsync/`
//!     on macOS).
//! 2.  **Project config**: `.pbxsync.yaml` in the working directory, or the
//!     file given with `--config` / `PBXSYNC_CONFIG`.
//!
//! Command-line flags override both.
//!
//! ```yaml
//! project: App.xcodeproj/project.pbxproj
//! source: App
//! destination: App Beta
//! phases: [sources, resources]
//! backup: true
//! backup_suffix: .orig
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::model::PhaseKind;

/// Settings read from configuration files. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the project descriptor, relative to the config file.
    #[serde(default)]
    pub project: Option<PathBuf>,
    /// Name of the target to copy from.
    #[serde(default)]
    pub source: Option<String>,
    /// Name of the target to overwrite.
    #[serde(default)]
    pub destination: Option<String>,
    /// Phase kinds to synchronize.
    #[serde(default)]
    pub phases: Option<Vec<PhaseKind>>,
    /// Whether to keep a backup of the original descriptor.
    #[serde(default)]
    pub backup: Option<bool>,
    /// Suffix appended to the backup file name.
    #[serde(default)]
    pub backup_suffix: Option<String>,
}

impl Config {
    /// Parse a configuration from YAML text.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "Valid keys are: project, source, destination, phases, backup, backup_suffix"
                    .to_string(),
            ),
        })
    }

    /// Read a configuration file. A relative `project` path is resolved
    /// against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut config = Self::parse(&text).map_err(|e| match e {
            Error::ConfigParse { message, hint } => Error::ConfigParse {
                message: format!("{}: {}", path.display(), message),
                hint,
            },
            other => other,
        })?;
        if let (Some(project), Some(dir)) = (&config.project, path.parent()) {
            if project.is_relative() {
                config.project = Some(dir.join(project));
            }
        }
        Ok(config)
    }

    /// Read a configuration file if it exists.
    pub fn from_optional_file(path: &Path) -> Result<Self> {
        if path.is_file() {
            debug!("loading config {}", path.display());
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Overlay `other` onto `self`: fields set in `other` win.
    pub fn merge(self, other: Config) -> Config {
        Config {
            project: other.project.or(self.project),
            source: other.source.or(self.source),
            destination: other.destination.or(self.destination),
            phases: other.phases.or(self.phases),
            backup: other.backup.or(self.backup),
            backup_suffix: other.backup_suffix.or(self.backup_suffix),
        }
    }

    /// Whether to back up the descriptor before writing.
    pub fn backup_enabled(&self) -> bool {
        self.backup.unwrap_or(true)
    }

    /// The backup suffix, falling back to the default.
    pub fn backup_suffix(&self) -> &str {
        self.backup_suffix
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BACKUP_SUFFIX)
    }
}

/// Load the user config, then the project config at `project_config`
/// (or `.pbxsync.yaml` in `working_dir`), merged in that order.
///
/// An explicitly given project config must exist.
pub fn load_layered(working_dir: &Path, project_config: Option<&Path>) -> Result<Config> {
    let user = match defaults::user_config_path() {
        Some(path) => Config::from_optional_file(&path)?,
        None => Config::default(),
    };

    let project = match project_config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_optional_file(&working_dir.join(defaults::DEFAULT_CONFIG_FILENAME))?,
    };

    Ok(user.merge(project))
}
