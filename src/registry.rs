//! The build-file registry.
//!
//! Every `PBXBuildFile` in the descriptor lives here, keyed by its entry id.
//! Phases never hold entries directly; they hold ids and resolve them through
//! the registry at use time. The registry also keeps the comment companion of
//! each entry (e.g. `AppDelegate.m in Sources`), keyed by the same id and
//! removed together with the entry.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::id::ObjectId;
use crate::model::Attributes;

/// Which attribute of a build file holds its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefKey {
    /// `fileRef`: a file reference or variant group.
    #[default]
    FileRef,
    /// `productRef`: a Swift package product dependency.
    ProductRef,
}

impl RefKey {
    /// The attribute name in the descriptor.
    pub fn as_str(self) -> &'static str {
        match self {
            RefKey::FileRef => "fileRef",
            RefKey::ProductRef => "productRef",
        }
    }
}

/// One build-file record.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFileEntry {
    /// The file (or product) this entry wraps. Shared, never duplicated.
    pub file_ref: ObjectId,
    pub ref_key: RefKey,
    /// Every other non-identifier attribute, notably `settings`.
    pub attributes: Attributes,
}

impl BuildFileEntry {
    /// Create an entry wrapping a file reference with no settings.
    pub fn new(file_ref: impl Into<ObjectId>) -> Self {
        Self {
            file_ref: file_ref.into(),
            ref_key: RefKey::FileRef,
            attributes: Attributes::new(),
        }
    }

    /// Attach a per-entry `settings` bag.
    pub fn with_settings(mut self, settings: Value) -> Self {
        self.attributes.insert("settings".to_string(), settings);
        self
    }

    /// The `settings` bag, if any.
    pub fn settings(&self) -> Option<&Value> {
        self.attributes.get("settings")
    }

    /// Structural equality of everything except identifiers.
    pub fn same_attributes(&self, other: &BuildFileEntry) -> bool {
        self.attributes == other.attributes
    }

    /// Read a `PBXBuildFile` object. Returns `None` if it carries neither a
    /// `fileRef` nor a `productRef`.
    pub fn from_attributes(attributes: &Attributes) -> Option<Self> {
        let (ref_key, file_ref) = [RefKey::FileRef, RefKey::ProductRef]
            .into_iter()
            .find_map(|key| {
                attributes
                    .get(key.as_str())
                    .and_then(Value::as_str)
                    .map(|id| (key, ObjectId::from(id)))
            })?;

        let attributes = attributes
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "isa" | "fileRef" | "productRef"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Some(Self {
            file_ref,
            ref_key,
            attributes,
        })
    }

    /// Write the entry back as a `PBXBuildFile` object.
    pub fn to_attributes(&self) -> Attributes {
        let mut object = self.attributes.clone();
        object.insert("isa".to_string(), Value::from("PBXBuildFile"));
        object.insert(
            self.ref_key.as_str().to_string(),
            Value::from(self.file_ref.as_str()),
        );
        object
    }
}

/// The registry of build-file entries, keyed by entry id.
#[derive(Debug, Clone, Default)]
pub struct BuildFileRegistry {
    entries: BTreeMap<ObjectId, BuildFileEntry>,
    comments: BTreeMap<ObjectId, String>,
}

impl BuildFileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entry. Fails if the id is already present.
    pub fn insert(&mut self, id: ObjectId, entry: BuildFileEntry) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(Error::IdentityCollision { id });
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Look up an entry.
    pub fn get(&self, id: &ObjectId) -> Option<&BuildFileEntry> {
        self.entries.get(id)
    }

    /// Look up an entry listed by `phase`, failing if it is missing.
    pub fn resolve(&self, id: &ObjectId, phase: &ObjectId) -> Result<&BuildFileEntry> {
        self.entries.get(id).ok_or_else(|| Error::UnresolvableEntry {
            entry: id.clone(),
            phase: phase.clone(),
        })
    }

    /// Remove an entry together with its comment companion.
    pub fn remove(&mut self, id: &ObjectId) -> Option<BuildFileEntry> {
        self.comments.remove(id);
        self.entries.remove(id)
    }

    /// Whether an entry with this id exists.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.entries.contains_key(id)
    }

    /// Set the comment companion of an entry.
    pub fn set_comment(&mut self, id: &ObjectId, comment: impl Into<String>) {
        self.comments.insert(id.clone(), comment.into());
    }

    /// The comment companion of an entry, if any.
    pub fn comment(&self, id: &ObjectId) -> Option<&str> {
        self.comments.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &BuildFileEntry)> {
        self.entries.iter()
    }
}
