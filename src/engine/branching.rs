//! engine::branching
//!
//! Branch publish and branch switching.
//!
//! # Architecture
//!
//! `branch` publishes the current workspace content of one file into
//! another branch's history by running the add-or-edit commit flow
//! against that branch directly. Branches never share storage: the
//! publish is a one-time content copy, not a link, and the destination
//! history evolves independently afterwards.
//!
//! `switch` swaps the whole workspace: every file tracked by the
//! outgoing branch is removed, the active pointer flips, and every file
//! tracked by the incoming branch is checked out at its head.

use std::io::ErrorKind;

use crate::core::error::OpError;
use crate::core::repo::Repository;
use crate::core::types::{BranchName, RevisionNumber, TrackedPath};
use crate::engine::commit;

/// What a successful branch publish produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The destination branch.
    pub branch: BranchName,
    /// The revision created in the destination history.
    pub revision: RevisionNumber,
    /// True when the destination branch itself was created.
    pub branch_created: bool,
    /// True when this was the file's first revision there.
    pub first_revision: bool,
}

/// What a successful switch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub from: BranchName,
    pub to: BranchName,
    /// Files of the outgoing branch removed from the workspace.
    pub removed: usize,
    /// Files of the incoming branch checked out at head.
    pub restored: usize,
}

/// Publish the workspace content of `path` into branch `name`.
///
/// Creates the branch when new. The generated commit message records
/// the source and destination pair.
///
/// # Errors
///
/// `NotTracked` when the active branch has no history for the path,
/// `PendingPath` when the path is staged, `InvalidBranchName` for
/// non-alphanumeric names. The inner commit can also surface
/// `StaleWorkspace` (destination marker behind its head) and
/// `NoChangeDetected` (destination head already holds this content).
pub fn branch(
    repo: &Repository,
    path: &TrackedPath,
    name: &str,
) -> Result<PublishOutcome, OpError> {
    let _lock = repo.lock()?;
    let registry = repo.branches();
    let active = registry.active()?;

    if !super::history(repo, &active, path).exists() {
        return Err(OpError::NotTracked {
            path: path.clone(),
            branch: active,
        });
    }
    let pending = repo.load_pending()?;
    if pending.contains(path) {
        return Err(OpError::PendingPath(path.clone()));
    }
    let dest = BranchName::new(name)?;

    let fs_path = repo.paths().workspace_path(path);
    if !fs_path.is_file() {
        return Err(OpError::MissingWorkspaceFile(path.clone()));
    }
    let content = crate::core::fsutil::read_bytes(&fs_path)?;

    let branch_created = !registry.exists(&dest);
    registry.create(&dest)?;

    let message = format!("Branching {path} from {active} to {dest}");
    let outcome = commit::commit_content(repo, &dest, path, &content, &message)?;

    Ok(PublishOutcome {
        branch: dest,
        revision: outcome.revision,
        branch_created,
        first_revision: outcome.created,
    })
}

/// Make `name` the active branch and re-materialize the workspace.
///
/// # Errors
///
/// `PendingNotEmpty` while anything is staged, `NoSuchBranch` when the
/// target has no registry entry.
pub fn switch(repo: &Repository, name: &BranchName) -> Result<SwitchOutcome, OpError> {
    let _lock = repo.lock()?;
    let registry = repo.branches();
    let active = registry.active()?;

    let pending = repo.load_pending()?;
    if !pending.is_empty() {
        return Err(OpError::PendingNotEmpty(pending.len()));
    }
    if !registry.exists(name) {
        return Err(OpError::NoSuchBranch(name.clone()));
    }

    let leaving = registry.tracked_files(&active)?;
    for path in &leaving {
        remove_workspace_file(repo, path)?;
    }

    registry.set_active(name)?;

    let arriving = registry.tracked_files(name)?;
    for path in &arriving {
        let history = super::history(repo, name, path);
        let log = history.require_log()?;
        commit::materialize(repo, name, path, log.head_entry())?;
    }

    Ok(SwitchOutcome {
        from: active,
        to: name.clone(),
        removed: leaving.len(),
        restored: arriving.len(),
    })
}

/// Delete a tracked file's workspace copy; already gone is fine.
fn remove_workspace_file(repo: &Repository, path: &TrackedPath) -> Result<(), OpError> {
    let fs_path = repo.paths().workspace_path(path);
    match std::fs::remove_file(&fs_path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(OpError::io(&fs_path, e)),
    }
}
