//! core::pending
//!
//! The pending set: files staged for the next commit.
//!
//! # Semantics
//!
//! The pending set is repository-wide (not per branch) and holds bare
//! paths only. Whether an entry is an Add or an Edit is derived at read
//! time from the active branch's histories, never stored; see
//! [`crate::engine::staging`].
//!
//! Entries keep their staging order, which is the order `status` reports
//! them in.
//!
//! # Storage
//!
//! - `<root>/.vellum/pending.json` - written by `setup` (empty) and
//!   rewritten atomically on every stage/commit

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::OpError;
use crate::core::record::{self, Record, RecordError};
use crate::core::types::TrackedPath;

/// The kind identifier for the pending set record.
pub const PENDING_KIND: &str = "vellum.pending-set";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The set of files staged for commit, in staging order.
///
/// # Example
///
/// ```
/// use vellum::core::pending::PendingSet;
/// use vellum::core::types::TrackedPath;
///
/// let mut pending = PendingSet::empty();
/// let path = TrackedPath::new("f.c").unwrap();
///
/// assert!(pending.stage(path.clone()));
/// assert!(!pending.stage(path.clone())); // second stage is a no-op
/// assert!(pending.contains(&path));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PendingSet {
    kind: String,
    schema_version: u32,
    paths: Vec<TrackedPath>,
}

impl Record for PendingSet {
    const KIND: &'static str = PENDING_KIND;
    const VERSION: u32 = SCHEMA_VERSION;

    fn envelope(&self) -> (&str, u32) {
        (&self.kind, self.schema_version)
    }

    fn validate_body(&self) -> Result<(), RecordError> {
        for (i, path) in self.paths.iter().enumerate() {
            if self.paths[..i].contains(path) {
                return Err(RecordError::InvalidValue(format!(
                    "duplicate pending entry \"{path}\""
                )));
            }
        }
        Ok(())
    }
}

impl PendingSet {
    /// An empty pending set.
    pub fn empty() -> Self {
        Self {
            kind: PENDING_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            paths: Vec::new(),
        }
    }

    /// Load the pending set from `path`.
    ///
    /// # Errors
    ///
    /// A missing file is corruption: `setup` writes the empty set, so
    /// absence means repository state has been damaged.
    pub fn load(path: &Path) -> Result<Self, OpError> {
        record::try_load(path)?
            .ok_or_else(|| OpError::corrupt(path, "pending set record is missing"))
    }

    /// Write the pending set to `path` atomically.
    pub fn save(&self, path: &Path) -> Result<(), OpError> {
        record::save(path, self)
    }

    /// Whether `path` is staged.
    pub fn contains(&self, path: &TrackedPath) -> bool {
        self.paths.contains(path)
    }

    /// Stage `path`. Returns `false` if it was already staged.
    pub fn stage(&mut self, path: TrackedPath) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Unstage `path`. Returns `false` if it was not staged.
    pub fn remove(&mut self, path: &TrackedPath) -> bool {
        match self.paths.iter().position(|p| p == path) {
            Some(i) => {
                self.paths.remove(i);
                true
            }
            None => false,
        }
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of staged files.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Staged paths in staging order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedPath> {
        self.paths.iter()
    }
}
