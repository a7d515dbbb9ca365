//! engine::suggest
//!
//! The advisory three-way merge between branch heads.
//!
//! # Architecture
//!
//! `suggest` takes the change between a source branch's previous and
//! head revisions and replays it onto the destination branch's head.
//! The result is written next to the file as a workspace artifact; no
//! committed history changes in either branch. Conflicts reduce the
//! applied change set but never abort the operation.

use crate::core::error::OpError;
use crate::core::fsutil;
use crate::core::repo::Repository;
use crate::core::types::{BranchName, RevisionNumber, TrackedPath};
use crate::merge;

/// What a suggestion run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestOutcome {
    /// Workspace-relative path of the written artifact.
    pub artifact: TrackedPath,
    /// Change blocks that could not be applied.
    pub conflicts: usize,
    /// Head of the source branch (the change endpoint).
    pub source_head: RevisionNumber,
    /// Head of the destination branch (the merge base text).
    pub dest_head: RevisionNumber,
}

/// Merge the newest source-branch change of `path` onto `dest`'s head.
///
/// # Errors
///
/// `NoSuchBranch` for either branch; `PendingPath` when the file is
/// staged; `NotTracked` when either branch lacks a history for it;
/// `NoAncestor` when the source head is the first revision; `NotText`
/// when any involved revision is not UTF-8 text.
///
/// The source-side checks run before any destination history is read.
pub fn suggest(
    repo: &Repository,
    path: &TrackedPath,
    source: &BranchName,
    dest: &BranchName,
) -> Result<SuggestOutcome, OpError> {
    let _lock = repo.lock()?;
    let registry = repo.branches();

    if !registry.exists(source) {
        return Err(OpError::NoSuchBranch(source.clone()));
    }
    if !registry.exists(dest) {
        return Err(OpError::NoSuchBranch(dest.clone()));
    }
    let pending = repo.load_pending()?;
    if pending.contains(path) {
        return Err(OpError::PendingPath(path.clone()));
    }

    let src_history = super::history(repo, source, path);
    let src_log = src_history.require_log()?;
    let source_head = src_log.head();
    let ancestor_rev = source_head.previous().ok_or_else(|| OpError::NoAncestor {
        path: path.clone(),
        branch: source.clone(),
    })?;

    let dst_history = super::history(repo, dest, path);
    let dst_log = dst_history.require_log()?;

    let ancestor_entry = src_log.entry(ancestor_rev).ok_or_else(|| {
        OpError::corrupt(
            repo.paths().revision_log_path(source, path),
            format!("r{ancestor_rev} is within range but absent from the log"),
        )
    })?;
    let ancestor = text_revision(&src_history, ancestor_entry, path)?;
    let source_text = text_revision(&src_history, src_log.head_entry(), path)?;
    let dest_text = text_revision(&dst_history, dst_log.head_entry(), path)?;

    let result = merge::three_way(&ancestor, &source_text, &dest_text);

    let artifact = path.with_suffix(&repo.config().suggest.suffix);
    fsutil::write_atomic(
        &repo.paths().workspace_path(&artifact),
        result.merged.as_bytes(),
    )?;

    Ok(SuggestOutcome {
        artifact,
        conflicts: result.conflicts,
        source_head,
        dest_head: dst_log.head(),
    })
}

/// Load one revision as UTF-8 text.
fn text_revision(
    history: &crate::store::history::FileHistory<'_>,
    entry: &crate::store::revlog::RevisionEntry,
    path: &TrackedPath,
) -> Result<String, OpError> {
    let bytes = history.load_content(entry.number, &entry.content_sha256)?;
    String::from_utf8(bytes).map_err(|_| OpError::NotText(path.clone()))
}
