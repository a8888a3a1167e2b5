//! # Error Handling
//!
//! This module defines the centralized error type for the `pbxsync` library.
//! It uses `thiserror` to build an `Error` enum that covers every failure the
//! descriptor access layer, the synchronization engine, and the peripheral
//! collaborators (discovery, configuration, persistence) can produce.
//!
//! The variants fall into three groups:
//!
//! - **Selection errors** (`TargetNotFound`, `InsufficientTargets`,
//!   `SameTarget`, `NoPhaseKinds`, `PhaseNotFound`, `SharedPhase`): raised
//!   before the registry is touched for the affected phase.
//! - **Descriptor integrity errors** (`UnresolvableEntry`,
//!   `IdentityCollision`, `DescriptorParse`): the descriptor is malformed or an
//!   invariant was violated. These are fatal and never silently tolerated.
//! - **Wrapped errors** (`Io`, `Json`, `Yaml`, `Glob`, `ConfigParse`).
//!
//! The `Result<T>` alias is used throughout the library.

use thiserror::Error;

use crate::id::ObjectId;
use crate::model::PhaseKind;

/// Main error type for pbxsync operations
#[derive(Error, Debug)]
pub enum Error {
    /// No native target carries the requested name.
    #[error("Target not found: '{name}'{}", format_available(available))]
    TargetNotFound {
        name: String,
        /// Names of the targets that do exist, for hints
        available: Vec<String>,
    },

    /// The descriptor has fewer than two named native targets.
    #[error("The project should have at least two targets (found {found})")]
    InsufficientTargets { found: usize },

    /// Source and destination resolve to the same target.
    #[error("Source and destination must be different targets (both are '{name}')")]
    SameTarget { name: String },

    /// No phase kinds were requested.
    #[error("At least one phase kind must be selected")]
    NoPhaseKinds,

    /// A target has no build phase of the requested kind.
    #[error("Target '{target}' has no {kind} build phase")]
    PhaseNotFound { target: String, kind: PhaseKind },

    /// Both targets point at the same phase object.
    #[error("Targets '{source_target}' and '{destination_target}' share the {kind} build phase {phase}")]
    SharedPhase {
        source_target: String,
        destination_target: String,
        kind: PhaseKind,
        phase: ObjectId,
    },

    /// A phase lists an entry id that has no build-file record.
    #[error("Build phase {phase} references unknown build file {entry}")]
    UnresolvableEntry { entry: ObjectId, phase: ObjectId },

    /// A freshly minted id already exists in the registry.
    #[error("Identifier collision: {id} already exists in the project")]
    IdentityCollision { id: ObjectId },

    /// The project descriptor could not be read.
    #[error("Project descriptor error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    DescriptorParse {
        message: String,
        /// Optional hint for how to fix the descriptor
        hint: Option<String>,
    },

    /// The `.pbxsync.yaml` configuration could not be parsed.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (available: {})", available.join(", "))
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
