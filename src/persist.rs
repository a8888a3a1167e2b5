//! Write a synchronized descriptor back to disk.
//!
//! The original file is renamed to `<file><suffix>` (default `.orig`) before
//! the new contents are written, so the previous state can be restored by
//! hand.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::Result;
use crate::project::ProjectDescriptor;

/// Path of the backup written next to `path`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Write `contents` to `path`, first moving the existing file to its backup
/// path when `backup_suffix` is given. Returns the backup path, if any.
pub fn write_with_backup(
    path: &Path,
    contents: &str,
    backup_suffix: Option<&str>,
) -> Result<Option<PathBuf>> {
    let mut backup = None;
    if let Some(suffix) = backup_suffix {
        if path.exists() {
            let target = backup_path(path, suffix);
            if target.exists() {
                warn!("replacing existing backup {}", target.display());
            }
            fs::rename(path, &target)?;
            info!("backed up {} to {}", path.display(), target.display());
            backup = Some(target);
        }
    }
    fs::write(path, contents)?;
    Ok(backup)
}

/// Serialize `descriptor` and write it to `path` with an optional backup.
pub fn save(
    descriptor: &ProjectDescriptor,
    path: &Path,
    backup_suffix: Option<&str>,
) -> Result<Option<PathBuf>> {
    let contents = descriptor.to_json_string()?;
    write_with_backup(path, &contents, backup_suffix)
}
