//! Diff two build phases for reporting.
//!
//! Entries are matched by the file they reference, never by entry id: ids
//! are per-target and never equal across targets. When a phase lists the
//! same file more than once, the k-th occurrence in the source pairs with the
//! k-th occurrence in the destination.

use std::collections::{HashMap, VecDeque};

use crate::error::Result;
use crate::id::ObjectId;
use crate::model::Phase;
use crate::registry::{BuildFileEntry, BuildFileRegistry};

/// An entry present on one side only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub entry_id: ObjectId,
    pub file_ref: ObjectId,
}

/// A file present on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedEntry {
    pub file_ref: ObjectId,
    pub source_id: ObjectId,
    pub destination_id: ObjectId,
}

/// Classification of a destination phase against a source phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseDiff {
    /// In the source, missing from the destination.
    pub added: Vec<DiffEntry>,
    /// In the destination, missing from the source.
    pub removed: Vec<DiffEntry>,
    /// On both sides with different settings.
    pub changed: Vec<MatchedEntry>,
    /// On both sides with identical settings.
    pub unchanged: Vec<MatchedEntry>,
}

impl PhaseDiff {
    /// True when a resync would not change the destination's content.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Number of added, removed, and changed entries.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Compare `destination` against `source`. Read-only.
pub fn diff(source: &Phase, destination: &Phase, registry: &BuildFileRegistry) -> Result<PhaseDiff> {
    let source_entries = resolve_all(source, registry)?;
    let destination_entries = resolve_all(destination, registry)?;

    let mut pending: HashMap<&ObjectId, VecDeque<usize>> = HashMap::new();
    for (index, (_, entry)) in destination_entries.iter().enumerate() {
        pending.entry(&entry.file_ref).or_default().push_back(index);
    }

    let mut result = PhaseDiff::default();
    let mut matched = vec![false; destination_entries.len()];

    for (source_id, entry) in &source_entries {
        match pending
            .get_mut(&entry.file_ref)
            .and_then(VecDeque::pop_front)
        {
            Some(index) => {
                matched[index] = true;
                let (destination_id, destination_entry) = destination_entries[index];
                let pair = MatchedEntry {
                    file_ref: entry.file_ref.clone(),
                    source_id: (*source_id).clone(),
                    destination_id: destination_id.clone(),
                };
                if entry.same_attributes(destination_entry) {
                    result.unchanged.push(pair);
                } else {
                    result.changed.push(pair);
                }
            }
            None => result.added.push(DiffEntry {
                entry_id: (*source_id).clone(),
                file_ref: entry.file_ref.clone(),
            }),
        }
    }

    result.removed = destination_entries
        .iter()
        .zip(matched)
        .filter(|(_, was_matched)| !was_matched)
        .map(|((entry_id, entry), _)| DiffEntry {
            entry_id: (*entry_id).clone(),
            file_ref: entry.file_ref.clone(),
        })
        .collect();

    Ok(result)
}

fn resolve_all<'a>(
    phase: &'a Phase,
    registry: &'a BuildFileRegistry,
) -> Result<Vec<(&'a ObjectId, &'a BuildFileEntry)>> {
    phase
        .files
        .iter()
        .map(|id| registry.resolve(id, &phase.id).map(|entry| (id, entry)))
        .collect()
}
