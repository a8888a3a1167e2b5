//! # pbxsync
//!
//! Keeps the build phases of Xcode targets in step. Given a project
//! descriptor (`project.pbxproj` in its JSON form), a source target, and a
//! destination target, it replaces the destination's sources, frameworks,
//! and resources phases with copies of the source's, minting fresh object
//! identifiers for every copied build file.
//!
//! ## Quick Example
//!
//! ```
//! use pbxsync::model::PhaseKind;
//! use pbxsync::project::ProjectDescriptor;
//! use pbxsync::sync;
//!
//! let json = r#"{
//!   "archiveVersion": "1",
//!   "objectVersion": "46",
//!   "rootObject": "R1",
//!   "objects": {
//!     "R1": {"isa": "PBXProject", "targets": ["T1", "T2"]},
//!     "F1": {"isa": "PBXFileReference", "path": "main.m"},
//!     "B1": {"isa": "PBXBuildFile", "fileRef": "F1"},
//!     "P1": {"isa": "PBXSourcesBuildPhase", "files": ["B1"]},
//!     "P2": {"isa": "PBXSourcesBuildPhase", "files": []},
//!     "T1": {"isa": "PBXNativeTarget", "name": "App", "buildPhases": ["P1"]},
//!     "T2": {"isa": "PBXNativeTarget", "name": "App Beta", "buildPhases": ["P2"]}
//!   }
//! }"#;
//!
//! let mut project = ProjectDescriptor::from_json_str(json).unwrap();
//! let app = project.find_target("App").unwrap().id.clone();
//! let beta = project.find_target("App Beta").unwrap().id.clone();
//!
//! let report = sync::synchronize(&mut project, &app, &beta, &[PhaseKind::Sources]).unwrap();
//! assert_eq!(report.get(PhaseKind::Sources).unwrap().added.len(), 1);
//! assert_eq!(project.target_phase(&beta, PhaseKind::Sources).unwrap().files.len(), 1);
//! ```
//!
//! ## Core Concepts
//!
//! - **Descriptor (`project`)**: parses the descriptor into targets, phases,
//!   and the build-file registry, and writes it back without losing the
//!   objects it does not model.
//! - **Registry (`registry`)**: the arena of build-file records. Phases hold
//!   identifiers into it, never the records themselves.
//! - **Identifiers (`id`)**: 24-hex-digit object ids and the allocator that
//!   never hands out an id the descriptor has already held.
//! - **Synchronization (`sync`)**: plans a run, diffs each phase pair, and
//!   resyncs the destination.
//!
//! The command-line front end adds discovery of projects on disk
//! (`discovery`), layered configuration (`config`), backups (`persist`), and
//! report rendering (`report`, `output`).

pub mod config;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod id;
pub mod model;
pub mod output;
pub mod persist;
pub mod project;
pub mod registry;
pub mod report;
pub mod suggestions;
pub mod sync;

mod sync_proptest;
#[cfg(test)]
mod test_support;
