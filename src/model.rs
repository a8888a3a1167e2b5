//! Typed views over the descriptor objects the engine works with.
//!
//! Only the attributes the engine reads or writes are lifted into fields.
//! Everything else an object carries stays in its `attributes` map so the
//! descriptor serializes back without loss.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::ObjectId;

/// Raw attribute bag of a descriptor object.
pub type Attributes = Map<String, Value>;

/// The build phase kinds the engine synchronizes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    /// Sources to compile
    Sources,
    /// Frameworks to link
    Frameworks,
    /// Resources to bundle
    Resources,
}

impl PhaseKind {
    /// All kinds, in the order they are processed by default.
    pub const ALL: [PhaseKind; 3] = [
        PhaseKind::Sources,
        PhaseKind::Frameworks,
        PhaseKind::Resources,
    ];

    /// The `isa` of the phase object in the descriptor.
    pub fn isa(self) -> &'static str {
        match self {
            PhaseKind::Sources => "PBXSourcesBuildPhase",
            PhaseKind::Frameworks => "PBXFrameworksBuildPhase",
            PhaseKind::Resources => "PBXResourcesBuildPhase",
        }
    }

    /// Map an `isa` back to a kind, if it is one the engine handles.
    pub fn from_isa(isa: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.isa() == isa)
    }

    /// Lowercase label used on the command line and in reports.
    pub fn label(self) -> &'static str {
        match self {
            PhaseKind::Sources => "sources",
            PhaseKind::Frameworks => "frameworks",
            PhaseKind::Resources => "resources",
        }
    }

    /// Name Xcode shows for the phase, e.g. "Sources".
    pub fn display_name(self) -> &'static str {
        match self {
            PhaseKind::Sources => "Sources",
            PhaseKind::Frameworks => "Frameworks",
            PhaseKind::Resources => "Resources",
        }
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PhaseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sources" | "files" => Ok(PhaseKind::Sources),
            "frameworks" => Ok(PhaseKind::Frameworks),
            "resources" => Ok(PhaseKind::Resources),
            _ => Err(format!(
                "Unknown phase kind '{}'. Use: sources, frameworks, or resources",
                s
            )),
        }
    }
}

/// A build phase object: an ordered list of build-file entry ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub id: ObjectId,
    /// The object's `isa`, e.g. `PBXSourcesBuildPhase`.
    pub isa: String,
    /// Entry ids in build order.
    pub files: Vec<ObjectId>,
    /// Every other attribute of the phase object.
    pub attributes: Attributes,
}

impl Phase {
    /// The kind of this phase, or `None` for phases the engine does not sync
    /// (headers, copy files, shell scripts, ...).
    pub fn kind(&self) -> Option<PhaseKind> {
        PhaseKind::from_isa(&self.isa)
    }
}

/// A named native build target.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: ObjectId,
    pub name: String,
    /// Build phase ids in the order Xcode runs them.
    pub build_phases: Vec<ObjectId>,
    /// Every other attribute of the target object.
    pub attributes: Attributes,
}

/// Read-only view of a file known to the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub id: ObjectId,
    pub isa: String,
    pub path: Option<String>,
    pub name: Option<String>,
    /// `lastKnownFileType`, falling back to `explicitFileType`.
    pub file_type: Option<String>,
}

impl FileReference {
    /// Build a view from a raw object, if it is a file-like object.
    pub fn from_attributes(id: &ObjectId, attributes: &Attributes) -> Option<Self> {
        let isa = attributes.get("isa")?.as_str()?;
        if !matches!(
            isa,
            "PBXFileReference" | "PBXVariantGroup" | "XCVersionGroup" | "PBXReferenceProxy"
        ) {
            return None;
        }
        let text = |key: &str| {
            attributes
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Some(Self {
            id: id.clone(),
            isa: isa.to_string(),
            path: text("path"),
            name: text("name"),
            file_type: text("lastKnownFileType").or_else(|| text("explicitFileType")),
        })
    }

    /// The name Xcode shows: `name`, else the last component of `path`.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        match &self.path {
            Some(path) => path.rsplit('/').next().unwrap_or(path).to_string(),
            None => self.id.to_string(),
        }
    }
}
