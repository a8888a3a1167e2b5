//! Locate project descriptors on disk.
//!
//! Searches a directory tree for `*.pbxproj` files, following symlinks.
//! Build output and dependency checkouts are skipped so that copies of a
//! project inside `DerivedData`, `build/`, `Pods/`, or `Carthage/` do not
//! show up next to the real one.

use std::path::{Path, PathBuf};

use glob::{glob, Pattern};
use log::{debug, warn};

use crate::error::Result;

/// Directory names never searched.
const SKIPPED_DIRS: &[&str] = &["DerivedData", "build", "Pods", "Carthage", ".git", "node_modules"];

/// Find every `*.pbxproj` under `root`, sorted by path.
pub fn find_projects(root: &Path) -> Result<Vec<PathBuf>> {
    // The root is a literal path, only the suffix is a pattern.
    let escaped = Pattern::escape(&root.to_string_lossy());
    let pattern = Path::new(&escaped).join("**").join("*.pbxproj");
    let pattern = pattern.to_string_lossy();
    debug!("searching for projects with pattern {}", pattern);

    let mut projects = Vec::new();
    for entry in glob(&pattern)? {
        match entry {
            Ok(path) => {
                if is_skipped(root, &path) {
                    continue;
                }
                projects.push(path);
            }
            Err(e) => warn!("skipping unreadable path {}: {}", e.path().display(), e),
        }
    }
    projects.sort();
    Ok(projects)
}

fn is_skipped(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
    })
}

/// Display form of a project path: relative to `root` when possible.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
