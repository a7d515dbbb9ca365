//! engine::staging
//!
//! The staging operations: add, edit, and status.
//!
//! # Invariants
//!
//! - `add` touches only the pending set; no history storage is created
//!   until commit.
//! - A path is staged at most once; whether it is an add or an edit is
//!   derived from whether a history exists, never stored.

use crate::core::error::OpError;
use crate::core::repo::Repository;
use crate::core::types::TrackedPath;

/// Derived type of a pending entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// No history on the active branch yet.
    Add,
    /// Extends an existing history.
    Edit,
}

impl std::fmt::Display for PendingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingKind::Add => write!(f, "add"),
            PendingKind::Edit => write!(f, "edit"),
        }
    }
}

/// One line of `status` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: TrackedPath,
    pub kind: PendingKind,
}

/// Stage a new file for its first commit.
///
/// # Errors
///
/// In order: `NotRegularFile` for directories and other non-regular
/// files, `NoSuchFile` when the path is absent, `AlreadyTracked` when a
/// history exists on the active branch, `AlreadyPending` when the path
/// is already staged.
pub fn add(repo: &Repository, path: &TrackedPath) -> Result<(), OpError> {
    let _lock = repo.lock()?;
    let active = repo.branches().active()?;

    let fs_path = repo.paths().workspace_path(path);
    if fs_path.is_dir() {
        return Err(OpError::NotRegularFile(path.clone()));
    }
    if !fs_path.exists() {
        return Err(OpError::NoSuchFile(path.clone()));
    }
    if !fs_path.is_file() {
        return Err(OpError::NotRegularFile(path.clone()));
    }
    if super::history(repo, &active, path).exists() {
        return Err(OpError::AlreadyTracked(path.clone(), active));
    }

    let mut pending = repo.load_pending()?;
    if !pending.stage(path.clone()) {
        return Err(OpError::AlreadyPending(path.clone()));
    }
    repo.save_pending(&pending)
}

/// Stage a tracked file for a follow-up commit.
///
/// # Errors
///
/// In order: `NotTracked` when the active branch has no history for the
/// path, `StaleWorkspace` when the workspace copy is not at head (sync
/// first), `AlreadyPending` when the path is already staged.
pub fn edit(repo: &Repository, path: &TrackedPath) -> Result<(), OpError> {
    let _lock = repo.lock()?;
    let active = repo.branches().active()?;

    let history = super::history(repo, &active, path);
    let log = history.require_log()?;
    let synced = history.synced_revision()?;
    if synced != log.head() {
        return Err(OpError::StaleWorkspace {
            path: path.clone(),
            synced: synced.get(),
            head: log.head().get(),
        });
    }

    let mut pending = repo.load_pending()?;
    if !pending.stage(path.clone()) {
        return Err(OpError::AlreadyPending(path.clone()));
    }
    repo.save_pending(&pending)
}

/// Report every pending path with its derived kind, in staging order.
pub fn status(repo: &Repository) -> Result<Vec<StatusEntry>, OpError> {
    let active = repo.branches().active()?;
    let pending = repo.load_pending()?;

    let mut entries = Vec::with_capacity(pending.len());
    for path in pending.iter() {
        let kind = if super::history(repo, &active, path).exists() {
            PendingKind::Edit
        } else {
            PendingKind::Add
        };
        entries.push(StatusEntry {
            path: path.clone(),
            kind,
        });
    }
    Ok(entries)
}
