//! Destructive resync of one destination phase.
//!
//! The destination's build files are deleted and re-created from the source
//! phase under fresh identifiers. This is a full replace, never a patch: the
//! diff computed beforehand is only reported.

use log::{debug, warn};

use crate::error::Result;
use crate::id::ObjectId;
use crate::project::ResyncParts;
use crate::registry::BuildFileEntry;

/// What a resync did to the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResyncOutcome {
    /// Destination entries deleted from the registry.
    pub removed: usize,
    /// Destination entries only unlisted because another phase still lists them.
    pub detached: usize,
    /// Ids of the new destination entries, in phase order.
    pub created: Vec<ObjectId>,
}

/// Replace the destination phase's entries with fresh copies of the source's.
///
/// Every source entry is resolved before anything is touched, so a malformed
/// source leaves the destination as it was.
pub fn resync(parts: ResyncParts<'_>) -> Result<ResyncOutcome> {
    let ResyncParts {
        source,
        source_files,
        destination,
        registry,
        ids,
        retained,
    } = parts;

    let templates: Vec<(BuildFileEntry, Option<String>)> = source_files
        .iter()
        .map(|id| {
            registry
                .resolve(id, &source)
                .map(|entry| (entry.clone(), registry.comment(id).map(str::to_string)))
        })
        .collect::<Result<_>>()?;

    let mut outcome = ResyncOutcome::default();

    for id in destination.files.drain(..) {
        if retained.contains(&id) {
            warn!(
                "build file {} is also listed by another phase; unlisting it from {} without deleting it",
                id, destination.id
            );
            outcome.detached += 1;
        } else if registry.remove(&id).is_some() {
            outcome.removed += 1;
        }
    }

    for (entry, comment) in templates {
        let id = ids.mint()?;
        registry.insert(id.clone(), entry)?;
        if let Some(comment) = comment {
            registry.set_comment(&id, comment);
        }
        destination.files.push(id.clone());
        outcome.created.push(id);
    }

    debug!(
        "resynced phase {} from {}: {} removed, {} detached, {} created",
        destination.id,
        source,
        outcome.removed,
        outcome.detached,
        outcome.created.len()
    );
    Ok(outcome)
}
