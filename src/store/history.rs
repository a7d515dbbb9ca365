//! store::history
//!
//! Per-file history access: one facade over the revision log, the
//! synced marker, and the content blobs of a single tracked file on a
//! single branch.
//!
//! # Architecture
//!
//! [`FileHistory`] borrows the repository's path routing and is
//! parameterized by branch, so engine operations can work against the
//! active branch and publish operations against a destination branch
//! through the same code. It offers storage primitives only; the order
//! in which an operation writes log, marker, and content is decided by
//! the engine.
//!
//! # Invariants
//!
//! - A blob listed by the log must exist and decode to content whose
//!   sha256 matches the log entry; anything else is corruption.
//! - A history directory with a log but no synced marker is corrupt.

use std::path::PathBuf;

use crate::core::error::OpError;
use crate::core::fsutil;
use crate::core::paths::RepoPaths;
use crate::core::types::{BranchName, ContentHash, RevisionNumber, TrackedPath};
use crate::store::codec::ContentCodec;
use crate::store::revlog::RevisionLog;
use crate::store::synced::SyncedMarker;

/// Storage access for one tracked file's history on one branch.
#[derive(Debug)]
pub struct FileHistory<'a> {
    paths: &'a RepoPaths,
    codec: ContentCodec,
    branch: &'a BranchName,
    path: &'a TrackedPath,
}

impl<'a> FileHistory<'a> {
    pub fn new(
        paths: &'a RepoPaths,
        codec: ContentCodec,
        branch: &'a BranchName,
        path: &'a TrackedPath,
    ) -> Self {
        Self {
            paths,
            codec,
            branch,
            path,
        }
    }

    /// The tracked path this history describes.
    pub fn path(&self) -> &TrackedPath {
        self.path
    }

    /// The branch this history lives on.
    pub fn branch(&self) -> &BranchName {
        self.branch
    }

    fn log_path(&self) -> PathBuf {
        self.paths.revision_log_path(self.branch, self.path)
    }

    fn synced_path(&self) -> PathBuf {
        self.paths.synced_marker_path(self.branch, self.path)
    }

    fn blob_path(&self, revision: RevisionNumber) -> PathBuf {
        self.paths.revision_blob_path(self.branch, self.path, revision)
    }

    /// Whether the file is tracked on this branch.
    pub fn exists(&self) -> bool {
        self.log_path().is_file()
    }

    /// Load the revision log, `None` when the file is not tracked here.
    pub fn load_log(&self) -> Result<Option<RevisionLog>, OpError> {
        RevisionLog::load(&self.log_path())
    }

    /// Load the revision log, failing when the file is not tracked here.
    pub fn require_log(&self) -> Result<RevisionLog, OpError> {
        self.load_log()?.ok_or_else(|| OpError::NotTracked {
            path: self.path.clone(),
            branch: self.branch.clone(),
        })
    }

    /// Persist the revision log atomically.
    pub fn save_log(&self, log: &RevisionLog) -> Result<(), OpError> {
        log.save(&self.log_path())
    }

    /// The revision the workspace copy was last synchronized to.
    ///
    /// Only meaningful while the log exists; a missing marker then is
    /// corruption.
    pub fn synced_revision(&self) -> Result<RevisionNumber, OpError> {
        match SyncedMarker::load(&self.synced_path())? {
            Some(marker) => Ok(marker.revision()),
            None => Err(OpError::corrupt(
                self.synced_path(),
                "synced marker is missing",
            )),
        }
    }

    /// Record that the workspace copy now reflects `revision`.
    pub fn mark_synced(&self, revision: RevisionNumber) -> Result<(), OpError> {
        SyncedMarker::new(revision).save(&self.synced_path())
    }

    /// Compress and store the content of `revision` atomically.
    pub fn store_content(&self, revision: RevisionNumber, content: &[u8]) -> Result<(), OpError> {
        let blob_path = self.blob_path(revision);
        let blob = self.codec.encode(content, &blob_path)?;
        fsutil::write_atomic(&blob_path, &blob)
    }

    /// Load and verify the content of `revision`.
    ///
    /// `expected` is the hash the revision log records; a decode that
    /// does not match it means the blob was damaged after commit.
    pub fn load_content(
        &self,
        revision: RevisionNumber,
        expected: &ContentHash,
    ) -> Result<Vec<u8>, OpError> {
        let blob_path = self.blob_path(revision);
        if !blob_path.is_file() {
            return Err(OpError::corrupt(
                &blob_path,
                format!("blob for r{revision} is missing"),
            ));
        }
        let blob = fsutil::read_bytes(&blob_path)?;
        let content = self.codec.decode(&blob, &blob_path)?;

        let actual = ContentHash::compute(&content);
        if actual != *expected {
            return Err(OpError::corrupt(
                &blob_path,
                format!("content hash mismatch: log records {expected}, blob decodes to {actual}"),
            ));
        }
        Ok(content)
    }
}
