//! # Project Descriptor Access
//!
//! Reads and writes the JSON form of an Xcode `project.pbxproj` and exposes
//! the lookups the synchronization engine needs:
//!
//! - targets by name (named `PBXNativeTarget` objects),
//! - a target's build phase of a given kind,
//! - the mutable build-file registry,
//! - a fresh-identifier allocator that never repeats an id the project has
//!   held.
//!
//! The classic OpenStep plist grammar is not parsed here. Xcode opens the
//! JSON form natively and `plutil -convert json project.pbxproj` produces it.
//!
//! Objects the engine does not model are kept verbatim so the descriptor
//! serializes back without loss.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::id::{IdAllocator, IdSource, ObjectId};
use crate::model::{Attributes, FileReference, Phase, PhaseKind, Target};
use crate::registry::{BuildFileEntry, BuildFileRegistry};

const NATIVE_TARGET_ISA: &str = "PBXNativeTarget";
const BUILD_FILE_ISA: &str = "PBXBuildFile";

/// A parsed project descriptor. The sole mutation boundary for the engine.
#[derive(Debug)]
pub struct ProjectDescriptor {
    /// Top-level keys other than `objects` (`archiveVersion`, `rootObject`, ...).
    header: Attributes,
    targets: BTreeMap<ObjectId, Target>,
    phases: BTreeMap<ObjectId, Phase>,
    registry: BuildFileRegistry,
    /// Every object the engine does not model, including build files that
    /// reference nothing.
    objects: BTreeMap<ObjectId, Attributes>,
    /// Targets whose object had no `buildPhases` key.
    phaseless_targets: BTreeSet<ObjectId>,
    ids: IdAllocator,
}

/// Disjoint borrows of the descriptor needed to resync one phase.
#[derive(Debug)]
pub struct ResyncParts<'a> {
    /// Id of the source phase.
    pub source: ObjectId,
    /// Entry ids of the source phase, in order.
    pub source_files: Vec<ObjectId>,
    pub destination: &'a mut Phase,
    pub registry: &'a mut BuildFileRegistry,
    pub ids: &'a mut IdAllocator,
    /// Entry ids still listed by some phase other than the destination.
    pub retained: BTreeSet<ObjectId>,
}

impl ProjectDescriptor {
    /// Parse a descriptor from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let trimmed = text.trim_start();
        if trimmed.starts_with("//") {
            return Err(Error::DescriptorParse {
                message: "project file is in the OpenStep plist format".to_string(),
                hint: Some(
                    "Convert it to JSON with `plutil -convert json project.pbxproj`".to_string(),
                ),
            });
        }

        let root: Value = serde_json::from_str(text).map_err(|e| Error::DescriptorParse {
            message: e.to_string(),
            hint: None,
        })?;
        let Value::Object(mut header) = root else {
            return Err(parse_error("top level is not an object"));
        };
        let Some(Value::Object(raw_objects)) = header.remove("objects") else {
            return Err(parse_error("missing 'objects' dictionary"));
        };

        let mut descriptor = Self {
            header,
            targets: BTreeMap::new(),
            phases: BTreeMap::new(),
            registry: BuildFileRegistry::new(),
            objects: BTreeMap::new(),
            phaseless_targets: BTreeSet::new(),
            ids: IdAllocator::new(),
        };

        for (key, value) in raw_objects {
            let id = ObjectId::from(key);
            let Value::Object(attributes) = value else {
                return Err(parse_error(format!("object {} is not a dictionary", id)));
            };
            descriptor.ids.reserve(&id);
            descriptor.classify(id, attributes)?;
        }

        descriptor.annotate_build_files();
        debug!(
            "parsed project: {} targets, {} phases, {} build files, {} other objects",
            descriptor.targets.len(),
            descriptor.phases.len(),
            descriptor.registry.len(),
            descriptor.objects.len()
        );
        Ok(descriptor)
    }

    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text).map_err(|e| match e {
            Error::DescriptorParse { message, hint } => Error::DescriptorParse {
                message: format!("{}: {}", path.display(), message),
                hint,
            },
            other => other,
        })
    }

    /// Serialize the descriptor back to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        let mut objects = Map::new();
        for (id, attributes) in &self.objects {
            objects.insert(id.to_string(), Value::Object(attributes.clone()));
        }
        for (id, entry) in self.registry.iter() {
            objects.insert(id.to_string(), Value::Object(entry.to_attributes()));
        }
        for (id, phase) in &self.phases {
            let mut object = phase.attributes.clone();
            object.insert("isa".to_string(), Value::from(phase.isa.as_str()));
            object.insert("files".to_string(), id_array(&phase.files));
            objects.insert(id.to_string(), Value::Object(object));
        }
        for (id, target) in &self.targets {
            let mut object = target.attributes.clone();
            object.insert("isa".to_string(), Value::from(NATIVE_TARGET_ISA));
            object.insert("name".to_string(), Value::from(target.name.as_str()));
            if !(target.build_phases.is_empty() && self.phaseless_targets.contains(id)) {
                object.insert("buildPhases".to_string(), id_array(&target.build_phases));
            }
            objects.insert(id.to_string(), Value::Object(object));
        }

        let mut root = self.header.clone();
        root.insert("objects".to_string(), Value::Object(objects));
        let mut text = serde_json::to_string_pretty(&Value::Object(root))?;
        text.push('\n');
        Ok(text)
    }

    /// Named native targets, in the order the project lists them.
    pub fn targets(&self) -> Vec<&Target> {
        let mut ordered: Vec<&Target> = self
            .project_target_ids()
            .iter()
            .filter_map(|id| self.targets.get(id))
            .collect();
        for target in self.targets.values() {
            if !ordered.iter().any(|t| t.id == target.id) {
                ordered.push(target);
            }
        }
        ordered
    }

    /// Targets that can take part in a sync. Fails if there are fewer than two.
    pub fn eligible_targets(&self) -> Result<Vec<&Target>> {
        let targets = self.targets();
        if targets.len() < 2 {
            return Err(Error::InsufficientTargets {
                found: targets.len(),
            });
        }
        Ok(targets)
    }

    /// Look up a target by name.
    pub fn find_target(&self, name: &str) -> Result<&Target> {
        self.targets
            .values()
            .find(|target| target.name == name)
            .ok_or_else(|| Error::TargetNotFound {
                name: name.to_string(),
                available: self.targets().iter().map(|t| t.name.clone()).collect(),
            })
    }

    /// Look up a target by id.
    pub fn target(&self, id: &ObjectId) -> Result<&Target> {
        self.targets.get(id).ok_or_else(|| Error::TargetNotFound {
            name: id.to_string(),
            available: self.targets().iter().map(|t| t.name.clone()).collect(),
        })
    }

    /// The first build phase of `kind` in the target's phase list.
    pub fn target_phase(&self, target: &ObjectId, kind: PhaseKind) -> Result<&Phase> {
        let owner = self.target(target)?;
        owner
            .build_phases
            .iter()
            .filter_map(|id| self.phases.get(id))
            .find(|phase| phase.kind() == Some(kind))
            .ok_or_else(|| Error::PhaseNotFound {
                target: owner.name.clone(),
                kind,
            })
    }

    /// Look up a phase by id.
    pub fn phase(&self, id: &ObjectId) -> Option<&Phase> {
        self.phases.get(id)
    }

    pub fn registry(&self) -> &BuildFileRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BuildFileRegistry {
        &mut self.registry
    }

    /// Mint an identifier unique within this descriptor.
    pub fn mint_id(&mut self) -> Result<ObjectId> {
        self.ids.mint()
    }

    /// Whether the descriptor has ever held this identifier.
    pub fn is_id_taken(&self, id: &ObjectId) -> bool {
        self.ids.is_taken(id)
    }

    /// Swap the candidate source used for new identifiers.
    pub fn set_id_source(&mut self, source: impl IdSource + 'static) {
        self.ids.set_source(source);
    }

    /// The file reference an entry points at, if it is a file.
    pub fn file_reference(&self, id: &ObjectId) -> Option<FileReference> {
        self.objects
            .get(id)
            .and_then(|attributes| FileReference::from_attributes(id, attributes))
    }

    /// Human-readable name of a referenced file or package product.
    pub fn display_name(&self, file_ref: &ObjectId) -> String {
        if let Some(reference) = self.file_reference(file_ref) {
            return reference.display_name();
        }
        self.objects
            .get(file_ref)
            .and_then(|attributes| attributes.get("productName"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| file_ref.to_string())
    }

    /// Split the descriptor into the pieces one phase resync mutates.
    pub fn split_for_resync(
        &mut self,
        source: &ObjectId,
        destination: &ObjectId,
    ) -> Result<ResyncParts<'_>> {
        let source_files = self
            .phases
            .get(source)
            .map(|phase| phase.files.clone())
            .ok_or_else(|| parse_error(format!("unknown build phase {}", source)))?;

        let retained = self
            .phases
            .iter()
            .filter(|(id, _)| *id != destination)
            .flat_map(|(_, phase)| phase.files.iter().cloned())
            .collect();

        let destination = self
            .phases
            .get_mut(destination)
            .ok_or_else(|| parse_error(format!("unknown build phase {}", destination)))?;

        Ok(ResyncParts {
            source: source.clone(),
            source_files,
            destination,
            registry: &mut self.registry,
            ids: &mut self.ids,
            retained,
        })
    }

    fn classify(&mut self, id: ObjectId, mut attributes: Attributes) -> Result<()> {
        let isa = attributes
            .get("isa")
            .and_then(Value::as_str)
            .ok_or_else(|| parse_error(format!("object {} has no 'isa'", id)))?
            .to_string();

        if isa == BUILD_FILE_ISA {
            match BuildFileEntry::from_attributes(&attributes) {
                Some(entry) => return self.registry.insert(id, entry),
                None => {
                    // Xcode leaves these behind after a file is deleted. They
                    // only fail a sync when a synchronized phase lists them.
                    debug!("build file {} has neither fileRef nor productRef", id);
                    self.objects.insert(id, attributes);
                    return Ok(());
                }
            }
        }

        if isa == NATIVE_TARGET_ISA {
            if let Some(name) = attributes.get("name").and_then(Value::as_str) {
                let name = name.to_string();
                if !attributes.contains_key("buildPhases") {
                    self.phaseless_targets.insert(id.clone());
                }
                let build_phases = take_id_array(&mut attributes, "buildPhases", &id)?;
                attributes.remove("name");
                attributes.remove("isa");
                self.targets.insert(
                    id.clone(),
                    Target {
                        id,
                        name,
                        build_phases,
                        attributes,
                    },
                );
                return Ok(());
            }
        }

        if isa.ends_with("BuildPhase") && attributes.contains_key("files") {
            let files = take_id_array(&mut attributes, "files", &id)?;
            attributes.remove("isa");
            self.phases.insert(
                id.clone(),
                Phase {
                    id,
                    isa,
                    files,
                    attributes,
                },
            );
            return Ok(());
        }

        self.objects.insert(id, attributes);
        Ok(())
    }

    /// Derive the `<file> in <Phase>` companion of every listed build file.
    fn annotate_build_files(&mut self) {
        let mut comments = Vec::new();
        for phase in self.phases.values() {
            let phase_name = phase_display_name(phase);
            for entry_id in &phase.files {
                if let Some(entry) = self.registry.get(entry_id) {
                    let file = self.display_name(&entry.file_ref);
                    comments.push((entry_id.clone(), format!("{} in {}", file, phase_name)));
                }
            }
        }
        for (id, comment) in comments {
            self.registry.set_comment(&id, comment);
        }
    }

    fn project_target_ids(&self) -> Vec<ObjectId> {
        self.header
            .get("rootObject")
            .and_then(Value::as_str)
            .and_then(|root| self.objects.get(&ObjectId::from(root)))
            .and_then(|project| project.get("targets"))
            .and_then(Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(Value::as_str)
                    .map(ObjectId::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Name Xcode shows for a phase: its `name`, else the kind, else the `isa`
/// stripped of `PBX`/`BuildPhase`.
pub fn phase_display_name(phase: &Phase) -> String {
    if let Some(name) = phase.attributes.get("name").and_then(Value::as_str) {
        return name.to_string();
    }
    if let Some(kind) = phase.kind() {
        return kind.display_name().to_string();
    }
    phase
        .isa
        .trim_start_matches("PBX")
        .trim_end_matches("BuildPhase")
        .to_string()
}

fn parse_error(message: impl Into<String>) -> Error {
    Error::DescriptorParse {
        message: message.into(),
        hint: None,
    }
}

fn take_id_array(attributes: &mut Attributes, key: &str, owner: &ObjectId) -> Result<Vec<ObjectId>> {
    match attributes.remove(key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(id) => Ok(ObjectId::from(id)),
                _ => Err(parse_error(format!(
                    "'{}' of object {} must contain identifiers",
                    key, owner
                ))),
            })
            .collect(),
        Some(_) => Err(parse_error(format!(
            "'{}' of object {} is not a list",
            key, owner
        ))),
    }
}

fn id_array(ids: &[ObjectId]) -> Value {
    Value::Array(ids.iter().map(|id| Value::from(id.as_str())).collect())
}
