//! store::revlog
//!
//! The per-file revision log record.
//!
//! # Storage
//!
//! Each tracked file's history directory holds a `log.json` describing
//! every committed revision: number, message, creation time, and the
//! sha256 of the stored content. The log is the source of truth for
//! what revisions exist; content blobs are addressed by the numbers it
//! lists.
//!
//! # Invariants
//!
//! - Revision numbers are contiguous starting at 1.
//! - A log on disk always holds at least one revision (it is created by
//!   the first commit, never by staging).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::OpError;
use crate::core::record::{self, Record, RecordError};
use crate::core::types::{ContentHash, RevisionNumber, TrackedPath, UtcTimestamp};

/// `kind` discriminator for revision log records.
pub const REVLOG_KIND: &str = "vellum.revision-log";

/// Current revision log schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// One committed revision of a tracked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevisionEntry {
    /// 1-based revision number.
    pub number: RevisionNumber,
    /// Commit message supplied by the user (or generated for publishes).
    pub message: String,
    /// When the revision was committed.
    pub created_at: UtcTimestamp,
    /// sha256 of the raw (uncompressed) content.
    pub content_sha256: ContentHash,
}

/// The complete revision history of one tracked file on one branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevisionLog {
    kind: String,
    schema_version: u32,
    /// Repository-relative path this log describes.
    pub path: TrackedPath,
    /// All revisions, oldest first.
    revisions: Vec<RevisionEntry>,
}

impl Record for RevisionLog {
    const KIND: &'static str = REVLOG_KIND;
    const VERSION: u32 = SCHEMA_VERSION;

    fn envelope(&self) -> (&str, u32) {
        (&self.kind, self.schema_version)
    }

    fn validate_body(&self) -> Result<(), RecordError> {
        if self.revisions.is_empty() {
            return Err(RecordError::InvalidValue(
                "revision log holds no revisions".to_string(),
            ));
        }
        for (index, entry) in self.revisions.iter().enumerate() {
            let expected = index as u64 + 1;
            if entry.number.get() != expected {
                return Err(RecordError::InvalidValue(format!(
                    "revision numbers must be contiguous from 1: \
                     position {index} holds r{}",
                    entry.number
                )));
            }
        }
        Ok(())
    }
}

impl RevisionLog {
    /// Start a new log with its first revision.
    pub fn first(path: TrackedPath, message: String, content_sha256: ContentHash) -> Self {
        Self {
            kind: REVLOG_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            path,
            revisions: vec![RevisionEntry {
                number: RevisionNumber::FIRST,
                message,
                created_at: UtcTimestamp::now(),
                content_sha256,
            }],
        }
    }

    /// Append the next revision and return its number.
    pub fn append(&mut self, message: String, content_sha256: ContentHash) -> RevisionNumber {
        let number = self.head();
        let next = number.next();
        self.revisions.push(RevisionEntry {
            number: next,
            message,
            created_at: UtcTimestamp::now(),
            content_sha256,
        });
        next
    }

    /// The newest revision number.
    pub fn head(&self) -> RevisionNumber {
        // validate_body guarantees at least one entry.
        self.revisions[self.revisions.len() - 1].number
    }

    /// The newest revision entry.
    pub fn head_entry(&self) -> &RevisionEntry {
        &self.revisions[self.revisions.len() - 1]
    }

    /// Look up one revision by number.
    pub fn entry(&self, number: RevisionNumber) -> Option<&RevisionEntry> {
        // Contiguity from 1 makes the index direct.
        self.revisions.get(number.get() as usize - 1)
    }

    /// All revisions, oldest first.
    pub fn entries(&self) -> &[RevisionEntry] {
        &self.revisions
    }

    /// Number of revisions.
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Load a log, returning `None` when the file does not exist.
    ///
    /// Absence is meaningful here: it is how "not tracked on this
    /// branch" is represented, so it is not an error at this layer.
    pub fn load(path: &Path) -> Result<Option<Self>, OpError> {
        record::try_load(path)
    }

    /// Persist the log atomically.
    pub fn save(&self, path: &Path) -> Result<(), OpError> {
        record::save(path, self)
    }
}
