//! # Build Phase Synchronization
//!
//! Mirrors the sources, frameworks, and resources phases of one target onto
//! another.
//!
//! ## Process
//!
//! 1.  **Planning**: both targets and every requested phase are resolved up
//!     front. Unknown targets, missing phases, and phases shared by both
//!     targets fail here, before the registry is touched.
//! 2.  **Diffing (`differ`)**: for each kind, the destination phase is compared
//!     with the source phase. The diff is only reported.
//! 3.  **Resync (`resync`)**: the destination's build files are deleted and
//!     re-created from the source under fresh ids.
//!
//! Kinds run in the order requested. A failure on one kind does not roll back
//! kinds that already completed; callers are expected to skip persistence
//! when `synchronize` returns an error.

pub mod differ;
pub mod resync;

use log::info;

use crate::error::{Error, Result};
use crate::id::ObjectId;
use crate::model::PhaseKind;
use crate::project::ProjectDescriptor;

pub use differ::{diff, DiffEntry, MatchedEntry, PhaseDiff};
pub use resync::{resync, ResyncOutcome};

/// Result of a synchronization, per phase kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Name of the source target.
    pub source: String,
    /// Name of the destination target.
    pub destination: String,
    phases: Vec<(PhaseKind, PhaseDiff)>,
}

impl SyncReport {
    fn new(source: &str, destination: &str) -> Self {
        Self {
            source: source.to_string(),
            destination: destination.to_string(),
            phases: Vec::new(),
        }
    }

    /// The diff recorded for `kind`, if it was processed.
    pub fn get(&self, kind: PhaseKind) -> Option<&PhaseDiff> {
        self.phases
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, diff)| diff)
    }

    /// Processed kinds and their diffs, in processing order.
    pub fn phases(&self) -> impl Iterator<Item = (PhaseKind, &PhaseDiff)> {
        self.phases.iter().map(|(kind, diff)| (*kind, diff))
    }

    /// True when no processed phase had any difference.
    pub fn is_empty(&self) -> bool {
        self.phases.iter().all(|(_, diff)| diff.is_empty())
    }

    /// Total added, removed, and changed entries across phases.
    pub fn change_count(&self) -> usize {
        self.phases.iter().map(|(_, diff)| diff.change_count()).sum()
    }
}

/// Resolved phase pair for one kind.
struct PhasePair {
    kind: PhaseKind,
    source: ObjectId,
    destination: ObjectId,
}

struct Plan {
    source_name: String,
    destination_name: String,
    pairs: Vec<PhasePair>,
}

fn plan(
    descriptor: &ProjectDescriptor,
    source: &ObjectId,
    destination: &ObjectId,
    kinds: &[PhaseKind],
) -> Result<Plan> {
    let source_target = descriptor.target(source)?;
    let destination_target = descriptor.target(destination)?;
    if source_target.id == destination_target.id {
        return Err(Error::SameTarget {
            name: source_target.name.clone(),
        });
    }

    let mut unique: Vec<PhaseKind> = Vec::with_capacity(kinds.len());
    for kind in kinds {
        if !unique.contains(kind) {
            unique.push(*kind);
        }
    }
    if unique.is_empty() {
        return Err(Error::NoPhaseKinds);
    }

    let mut pairs = Vec::with_capacity(unique.len());
    for kind in unique {
        let source_phase = descriptor.target_phase(source, kind)?;
        let destination_phase = descriptor.target_phase(destination, kind)?;
        if source_phase.id == destination_phase.id {
            return Err(Error::SharedPhase {
                source_target: source_target.name.clone(),
                destination_target: destination_target.name.clone(),
                kind,
                phase: source_phase.id.clone(),
            });
        }
        pairs.push(PhasePair {
            kind,
            source: source_phase.id.clone(),
            destination: destination_phase.id.clone(),
        });
    }

    Ok(Plan {
        source_name: source_target.name.clone(),
        destination_name: destination_target.name.clone(),
        pairs,
    })
}

fn diff_pair(descriptor: &ProjectDescriptor, pair: &PhasePair) -> Result<PhaseDiff> {
    // Both ids came from `plan`, so the lookups cannot miss.
    match (descriptor.phase(&pair.source), descriptor.phase(&pair.destination)) {
        (Some(source), Some(destination)) => diff(source, destination, descriptor.registry()),
        _ => Err(Error::PhaseNotFound {
            target: pair.destination.to_string(),
            kind: pair.kind,
        }),
    }
}

/// Mirror the requested phase kinds of `source` onto `destination`.
///
/// Returns the per-kind diff of the destination as it was before the resync.
pub fn synchronize(
    descriptor: &mut ProjectDescriptor,
    source: &ObjectId,
    destination: &ObjectId,
    kinds: &[PhaseKind],
) -> Result<SyncReport> {
    let plan = plan(descriptor, source, destination, kinds)?;
    let mut report = SyncReport::new(&plan.source_name, &plan.destination_name);

    for pair in &plan.pairs {
        let phase_diff = diff_pair(descriptor, pair)?;
        let outcome = resync(descriptor.split_for_resync(&pair.source, &pair.destination)?)?;
        info!(
            "synced {} of '{}' onto '{}': {} entries ({} added, {} removed, {} changed)",
            pair.kind,
            plan.source_name,
            plan.destination_name,
            outcome.created.len(),
            phase_diff.added.len(),
            phase_diff.removed.len(),
            phase_diff.changed.len()
        );
        report.phases.push((pair.kind, phase_diff));
    }

    Ok(report)
}

/// Compute the report `synchronize` would return, without mutating anything.
pub fn preview(
    descriptor: &ProjectDescriptor,
    source: &ObjectId,
    destination: &ObjectId,
    kinds: &[PhaseKind],
) -> Result<SyncReport> {
    let plan = plan(descriptor, source, destination, kinds)?;
    let mut report = SyncReport::new(&plan.source_name, &plan.destination_name);
    for pair in &plan.pairs {
        report.phases.push((pair.kind, diff_pair(descriptor, pair)?));
    }
    Ok(report)
}
