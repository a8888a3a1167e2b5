//! Default values for pbxsync configuration.
//!
//! Centralized so the CLI and the config loader agree.

use std::path::PathBuf;

use crate::model::PhaseKind;

/// Name of the project-level configuration file.
pub const DEFAULT_CONFIG_FILENAME: &str = ".pbxsync.yaml";

/// Suffix appended to the descriptor's file name for the backup copy.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".orig";

/// Phase kinds synchronized when "everything" is chosen.
pub const DEFAULT_PHASES: [PhaseKind; 3] = PhaseKind::ALL;

/// Returns the user-level configuration file path.
///
/// Uses the platform-appropriate config directory:
/// - Linux: `~/.config/pbxsync/config.yaml` (XDG Base Directory)
/// - macOS: `~/Library/Application Support/pbxsync/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\pbxsync\config.yaml`
///
/// Returns `None` if the platform directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pbxsync").join("config.yaml"))
}
