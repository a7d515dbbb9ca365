//! store::synced
//!
//! The per-file synced-revision marker.
//!
//! # Storage
//!
//! `synced.json` sits beside `log.json` in each history directory and
//! records which revision the workspace copy was last synchronized to.
//! It is what makes stale-workspace detection possible: edits are only
//! accepted when the marker equals the head of the log.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::OpError;
use crate::core::record::{self, Record, RecordError};
use crate::core::types::RevisionNumber;

/// `kind` discriminator for synced marker records.
pub const SYNCED_KIND: &str = "vellum.synced-marker";

/// Current synced marker schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The revision the workspace copy currently reflects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncedMarker {
    kind: String,
    schema_version: u32,
    revision: RevisionNumber,
}

impl Record for SyncedMarker {
    const KIND: &'static str = SYNCED_KIND;
    const VERSION: u32 = SCHEMA_VERSION;

    fn envelope(&self) -> (&str, u32) {
        (&self.kind, self.schema_version)
    }

    fn validate_body(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

impl SyncedMarker {
    /// Build a marker pointing at `revision`.
    pub fn new(revision: RevisionNumber) -> Self {
        Self {
            kind: SYNCED_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            revision,
        }
    }

    /// The recorded revision.
    pub fn revision(&self) -> RevisionNumber {
        self.revision
    }

    /// Load a marker, returning `None` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, OpError> {
        record::try_load(path)
    }

    /// Persist the marker atomically.
    pub fn save(&self, path: &Path) -> Result<(), OpError> {
        record::save(path, self)
    }
}
