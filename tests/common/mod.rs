//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_project();
//!     fixture.command().arg("ls").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::ids;
    pub use super::TestFixture;
}

/// Object identifiers used by [`SAMPLE_PROJECT`].
#[allow(dead_code)]
pub mod ids {
    pub const APP: &str = "AA0000000000000000000001";
    pub const APP_BETA: &str = "AA0000000000000000000002";

    pub const APP_DELEGATE: &str = "FF0000000000000000000001";
    pub const MAIN: &str = "FF0000000000000000000002";
    pub const UIKIT: &str = "FF0000000000000000000003";
    pub const STORYBOARD: &str = "FF0000000000000000000004";
    pub const BETA_ONLY: &str = "FF0000000000000000000005";

    pub const APP_SOURCES: &str = "CC0000000000000000000001";
    pub const BETA_SOURCES: &str = "CC0000000000000000000004";
    pub const BETA_RESOURCES: &str = "CC0000000000000000000006";

    /// Build files listed by the "App Beta" sources phase.
    pub const BETA_ONLY_BUILD: &str = "BB0000000000000000000005";
    pub const BETA_MAIN_BUILD: &str = "BB0000000000000000000006";
}

/// Two targets. "App" compiles AppDelegate.m and main.m, links UIKit, and
/// bundles Main.storyboard. "App Beta" compiles BetaOnly.m and main.m (with
/// extra compiler flags) and has empty frameworks and resources phases.
pub const SAMPLE_PROJECT: &str = r#"{
  "archiveVersion": "1",
  "classes": {},
  "objectVersion": "46",
  "rootObject": "EE0000000000000000000001",
  "objects": {
    "EE0000000000000000000001": {
      "isa": "PBXProject",
      "targets": ["AA0000000000000000000001", "AA0000000000000000000002"]
    },
    "FF0000000000000000000001": {"isa": "PBXFileReference", "path": "App/AppDelegate.m", "sourceTree": "<group>"},
    "FF0000000000000000000002": {"isa": "PBXFileReference", "path": "App/main.m", "sourceTree": "<group>"},
    "FF0000000000000000000003": {"isa": "PBXFileReference", "name": "UIKit.framework", "path": "System/Library/Frameworks/UIKit.framework", "sourceTree": "SDKROOT"},
    "FF0000000000000000000004": {"isa": "PBXFileReference", "path": "App/Base.lproj/Main.storyboard", "sourceTree": "<group>"},
    "FF0000000000000000000005": {"isa": "PBXFileReference", "path": "App/BetaOnly.m", "sourceTree": "<group>"},
    "BB0000000000000000000001": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000001"},
    "BB0000000000000000000002": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000002"},
    "BB0000000000000000000003": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000003"},
    "BB0000000000000000000004": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000004"},
    "BB0000000000000000000005": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000005"},
    "BB0000000000000000000006": {"isa": "PBXBuildFile", "fileRef": "FF0000000000000000000002", "settings": {"COMPILER_FLAGS": "-w"}},
    "CC0000000000000000000001": {"isa": "PBXSourcesBuildPhase", "buildActionMask": "2147483647", "files": ["BB0000000000000000000001", "BB0000000000000000000002"], "runOnlyForDeploymentPostprocessing": "0"},
    "CC0000000000000000000002": {"isa": "PBXFrameworksBuildPhase", "buildActionMask": "2147483647", "files": ["BB0000000000000000000003"], "runOnlyForDeploymentPostprocessing": "0"},
    "CC0000000000000000000003": {"isa": "PBXResourcesBuildPhase", "buildActionMask": "2147483647", "files": ["BB0000000000000000000004"], "runOnlyForDeploymentPostprocessing": "0"},
    "CC0000000000000000000004": {"isa": "PBXSourcesBuildPhase", "buildActionMask": "2147483647", "files": ["BB0000000000000000000005", "BB0000000000000000000006"], "runOnlyForDeploymentPostprocessing": "0"},
    "CC0000000000000000000005": {"isa": "PBXFrameworksBuildPhase", "buildActionMask": "2147483647", "files": [], "runOnlyForDeploymentPostprocessing": "0"},
    "CC0000000000000000000006": {"isa": "PBXResourcesBuildPhase", "buildActionMask": "2147483647", "files": [], "runOnlyForDeploymentPostprocessing": "0"},
    "AA0000000000000000000001": {
      "isa": "PBXNativeTarget",
      "name": "App",
      "productName": "App",
      "buildPhases": ["CC0000000000000000000001", "CC0000000000000000000002", "CC0000000000000000000003"]
    },
    "AA0000000000000000000002": {
      "isa": "PBXNativeTarget",
      "name": "App Beta",
      "productName": "App Beta",
      "buildPhases": ["CC0000000000000000000004", "CC0000000000000000000005", "CC0000000000000000000006"]
    }
  }
}
"#;

/// Location of the sample descriptor inside a fixture.
pub const PROJECT_PATH: &str = "App.xcodeproj/project.pbxproj";

/// A temporary directory holding a project and optional configuration.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add [`SAMPLE_PROJECT`] at [`PROJECT_PATH`].
    pub fn with_project(self) -> Self {
        self.with_file(PROJECT_PATH, SAMPLE_PROJECT)
    }

    /// Add the sample project after passing it through `edit`.
    pub fn with_edited_project(self, edit: impl FnOnce(&mut Value)) -> Self {
        let mut project: Value = serde_json::from_str(SAMPLE_PROJECT).expect("sample project");
        edit(&mut project);
        let text = serde_json::to_string_pretty(&project).expect("serializable project");
        self.with_file(PROJECT_PATH, &text)
    }

    /// Add a `.pbxsync.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".pbxsync.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the project descriptor.
    pub fn project_path(&self) -> PathBuf {
        self.temp_dir.path().join(PROJECT_PATH)
    }

    /// Raw text of the project descriptor.
    pub fn project_text(&self) -> String {
        std::fs::read_to_string(self.project_path()).expect("Failed to read project")
    }

    /// The project descriptor as JSON.
    pub fn project_json(&self) -> Value {
        serde_json::from_str(&self.project_text()).expect("project is valid JSON")
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command that runs in this fixture's directory, isolated from
    /// the user's configuration and with colors off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("pbxsync");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("PBXSYNC_CONFIG")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry ids listed by the phase `phase_id` of `project`.
#[allow(dead_code)]
pub fn phase_files(project: &Value, phase_id: &str) -> Vec<String> {
    project["objects"][phase_id]["files"]
        .as_array()
        .expect("phase has files")
        .iter()
        .map(|id| id.as_str().expect("id is a string").to_string())
        .collect()
}

/// The `fileRef` of each entry listed by `phase_id`.
#[allow(dead_code)]
pub fn phase_file_refs(project: &Value, phase_id: &str) -> Vec<String> {
    phase_files(project, phase_id)
        .iter()
        .map(|entry| {
            project["objects"][entry.as_str()]["fileRef"]
                .as_str()
                .expect("entry has a fileRef")
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_with_project() {
        let fixture = TestFixture::new().with_project();
        assert!(fixture.project_path().exists());
        assert_eq!(
            phase_file_refs(&fixture.project_json(), ids::BETA_SOURCES),
            vec![ids::BETA_ONLY, ids::MAIN]
        );
    }

    #[test]
    fn test_fixture_with_edited_project() {
        let fixture = TestFixture::new().with_edited_project(|project| {
            project["objects"][ids::APP_BETA]["name"] = Value::from("Renamed");
        });
        assert_eq!(
            fixture.project_json()["objects"][ids::APP_BETA]["name"],
            "Renamed"
        );
    }
}
