//! Object identifiers and the fresh-identifier allocator.
//!
//! Every object in a project descriptor is keyed by an opaque identifier.
//! Xcode writes them as 24 uppercase hexadecimal characters; the allocator
//! mints new ones in the same shape and never hands out an identifier the
//! descriptor has held before, including identifiers whose objects were
//! deleted earlier in the session.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Length of an Xcode-style object identifier.
pub const ID_LEN: usize = 24;

/// Candidates tried before minting gives up.
const MAX_MINT_ATTEMPTS: usize = 64;

/// Identifier of one object in the project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Create an identifier from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Source of candidate identifiers.
///
/// Candidates need not be unique; [`IdAllocator`] rejects the ones already
/// taken.
pub trait IdSource: fmt::Debug {
    /// Produce the next candidate identifier.
    fn next_candidate(&mut self) -> ObjectId;
}

/// Random candidates derived from a v4 UUID, truncated to [`ID_LEN`]
/// uppercase hex characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_candidate(&mut self) -> ObjectId {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        ObjectId(hex[..ID_LEN].to_string())
    }
}

/// Deterministic candidates `PREFIX000...1`, `PREFIX000...2`, ...
///
/// Useful for reproducible output in tests and dry runs.
#[derive(Debug, Clone)]
pub struct SequentialSource {
    prefix: String,
    next: u64,
}

impl SequentialSource {
    /// Create a sequence whose identifiers start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialSource {
    fn next_candidate(&mut self) -> ObjectId {
        let width = ID_LEN.saturating_sub(self.prefix.len());
        let id = format!("{}{:0width$X}", self.prefix, self.next, width = width);
        self.next += 1;
        ObjectId(id)
    }
}

/// Hands out identifiers that are unique within one descriptor.
#[derive(Debug)]
pub struct IdAllocator {
    taken: BTreeSet<ObjectId>,
    source: Box<dyn IdSource>,
}

impl IdAllocator {
    /// Create an allocator backed by random UUID candidates.
    pub fn new() -> Self {
        Self::with_source(UuidSource)
    }

    /// Create an allocator backed by a custom candidate source.
    pub fn with_source(source: impl IdSource + 'static) -> Self {
        Self {
            taken: BTreeSet::new(),
            source: Box::new(source),
        }
    }

    /// Replace the candidate source, keeping the reserved set.
    pub fn set_source(&mut self, source: impl IdSource + 'static) {
        self.source = Box::new(source);
    }

    /// Mark an existing identifier as taken.
    pub fn reserve(&mut self, id: &ObjectId) {
        self.taken.insert(id.clone());
    }

    /// Whether the identifier has ever been held by the descriptor.
    pub fn is_taken(&self, id: &ObjectId) -> bool {
        self.taken.contains(id)
    }

    /// Mint an identifier never seen before in this descriptor.
    pub fn mint(&mut self) -> Result<ObjectId> {
        let mut last = None;
        for _ in 0..MAX_MINT_ATTEMPTS {
            let candidate = self.source.next_candidate();
            if self.taken.insert(candidate.clone()) {
                return Ok(candidate);
            }
            last = Some(candidate);
        }
        Err(Error::IdentityCollision {
            id: last.unwrap_or_else(|| ObjectId::from("")),
        })
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
