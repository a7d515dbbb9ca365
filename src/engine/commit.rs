//! engine::commit
//!
//! Revision creation and workspace synchronization.
//!
//! # Architecture
//!
//! `commit` consumes a pending entry and appends exactly one revision;
//! `sync` rewrites the workspace copy from a stored revision and is the
//! only way the synced pointer moves backward. Both follow fixed write
//! orders so a crash between steps never leaves a log entry without its
//! blob or a workspace edit claiming the wrong base.
//!
//! Commit writes: content blob, then log, then synced marker, then the
//! pending set. Sync writes: synced marker, then workspace content.

use crate::core::error::OpError;
use crate::core::fsutil;
use crate::core::repo::Repository;
use crate::core::types::{
    BranchName, ContentHash, RevisionNumber, SyncTarget, TrackedPath, TypeError,
};
use crate::store::revlog::{RevisionEntry, RevisionLog};

/// What a successful commit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The revision that was appended.
    pub revision: RevisionNumber,
    /// True when this commit created the file's history (an add).
    pub created: bool,
}

/// What a successful sync produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOutcome {
    /// The revision now checked out.
    pub revision: RevisionNumber,
    /// The head at the time of the sync.
    pub head: RevisionNumber,
}

/// Commit the staged change for `path` on the active branch.
///
/// # Errors
///
/// `NotPending` when the path is not staged; `MissingWorkspaceFile`
/// when the workspace copy vanished after staging; `StaleWorkspace` and
/// `NoChangeDetected` re-validated at commit time for edits.
pub fn commit(
    repo: &Repository,
    path: &TrackedPath,
    message: &str,
) -> Result<CommitOutcome, OpError> {
    let _lock = repo.lock()?;
    let active = repo.branches().active()?;

    let mut pending = repo.load_pending()?;
    if !pending.contains(path) {
        return Err(OpError::NotPending(path.clone()));
    }

    let fs_path = repo.paths().workspace_path(path);
    if !fs_path.is_file() {
        return Err(OpError::MissingWorkspaceFile(path.clone()));
    }
    let content = fsutil::read_bytes(&fs_path)?;

    let outcome = commit_content(repo, &active, path, &content, message)?;

    pending.remove(path);
    repo.save_pending(&pending)?;
    Ok(outcome)
}

/// Append `content` as the next revision of `path` on `branch`.
///
/// Creates the history when none exists. Shared between `commit` (on
/// the active branch) and the branch publish (on the destination).
pub(crate) fn commit_content(
    repo: &Repository,
    branch: &BranchName,
    path: &TrackedPath,
    content: &[u8],
    message: &str,
) -> Result<CommitOutcome, OpError> {
    let history = super::history(repo, branch, path);

    match history.load_log()? {
        None => {
            let hash = ContentHash::compute(content);
            history.store_content(RevisionNumber::FIRST, content)?;
            let log = RevisionLog::first(path.clone(), message.to_string(), hash);
            history.save_log(&log)?;
            history.mark_synced(RevisionNumber::FIRST)?;
            Ok(CommitOutcome {
                revision: RevisionNumber::FIRST,
                created: true,
            })
        }
        Some(mut log) => {
            let synced = history.synced_revision()?;
            if synced != log.head() {
                return Err(OpError::StaleWorkspace {
                    path: path.clone(),
                    synced: synced.get(),
                    head: log.head().get(),
                });
            }

            let head_entry = log.head_entry();
            let head_content = history.load_content(log.head(), &head_entry.content_sha256)?;
            if head_content == content {
                return Err(OpError::NoChangeDetected(path.clone()));
            }

            let hash = ContentHash::compute(content);
            let next = log.head().next();
            history.store_content(next, content)?;
            log.append(message.to_string(), hash);
            history.save_log(&log)?;
            history.mark_synced(next)?;
            Ok(CommitOutcome {
                revision: next,
                created: false,
            })
        }
    }
}

/// Check out a revision of `path` into the workspace.
///
/// `raw_target` is a revision number or the literal `HEAD`.
///
/// # Errors
///
/// `PendingPath` when the path is staged; `NotTracked` without a
/// history; `MalformedRevision` for non-numeric targets;
/// `RevisionOutOfRange` for numbers outside `[1, head]`.
pub fn sync(
    repo: &Repository,
    path: &TrackedPath,
    raw_target: &str,
) -> Result<SyncOutcome, OpError> {
    let _lock = repo.lock()?;
    let active = repo.branches().active()?;

    let pending = repo.load_pending()?;
    if pending.contains(path) {
        return Err(OpError::PendingPath(path.clone()));
    }

    let history = super::history(repo, &active, path);
    let log = history.require_log()?;
    let head = log.head();

    let resolved = match SyncTarget::parse(raw_target) {
        Ok(SyncTarget::Head) => head,
        Ok(SyncTarget::Revision(n)) if n > head => {
            return Err(OpError::RevisionOutOfRange {
                path: path.clone(),
                requested: n.get(),
                head: head.get(),
            });
        }
        Ok(SyncTarget::Revision(n)) => n,
        Err(TypeError::InvalidRevisionNumber(_)) => {
            let requested = raw_target.parse::<u64>().unwrap_or(0);
            return Err(OpError::RevisionOutOfRange {
                path: path.clone(),
                requested,
                head: head.get(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let entry = log.entry(resolved).ok_or_else(|| {
        OpError::corrupt(
            repo.paths().revision_log_path(&active, path),
            format!("r{resolved} is within range but absent from the log"),
        )
    })?;
    materialize(repo, &active, path, entry)?;

    Ok(SyncOutcome {
        revision: resolved,
        head,
    })
}

/// The full history of `path` on the active branch.
pub fn log(repo: &Repository, path: &TrackedPath) -> Result<RevisionLog, OpError> {
    let active = repo.branches().active()?;
    super::history(repo, &active, path).require_log()
}

/// Write a stored revision into the workspace and move the marker.
///
/// Marker before content: an interrupted sync must never leave newer
/// content recorded against an older base.
pub(crate) fn materialize(
    repo: &Repository,
    branch: &BranchName,
    path: &TrackedPath,
    entry: &RevisionEntry,
) -> Result<(), OpError> {
    let history = super::history(repo, branch, path);
    let content = history.load_content(entry.number, &entry.content_sha256)?;
    history.mark_synced(entry.number)?;
    fsutil::write_atomic(&repo.paths().workspace_path(path), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::staging;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        repo: Repository,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let repo = Repository::setup(tmp.path()).unwrap();
            Self { _tmp: tmp, repo }
        }

        fn write(&self, rel: &str, content: &str) -> TrackedPath {
            let path = TrackedPath::new(rel).unwrap();
            let fs_path = self.repo.paths().workspace_path(&path);
            if let Some(parent) = fs_path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&fs_path, content).unwrap();
            path
        }

        fn read(&self, path: &TrackedPath) -> String {
            std::fs::read_to_string(self.repo.paths().workspace_path(path)).unwrap()
        }

        fn committed(&self, rel: &str, content: &str, message: &str) -> TrackedPath {
            let path = self.write(rel, content);
            staging::add(&self.repo, &path).unwrap();
            commit(&self.repo, &path, message).unwrap();
            path
        }

        fn amend(&self, path: &TrackedPath, content: &str, message: &str) {
            let fs_path = self.repo.paths().workspace_path(path);
            staging::edit(&self.repo, path).unwrap();
            std::fs::write(&fs_path, content).unwrap();
            commit(&self.repo, path, message).unwrap();
        }
    }

    mod commit_op {
        use super::*;

        #[test]
        fn first_commit_creates_history_at_r1() {
            let fx = Fixture::new();
            let path = fx.write("a.c", "v1\n");
            staging::add(&fx.repo, &path).unwrap();

            let outcome = commit(&fx.repo, &path, "first").unwrap();
            assert_eq!(outcome.revision, RevisionNumber::FIRST);
            assert!(outcome.created);

            let history = log(&fx.repo, &path).unwrap();
            assert_eq!(history.head(), RevisionNumber::FIRST);
            assert_eq!(history.head_entry().message, "first");
            assert!(!fx.repo.load_pending().unwrap().contains(&path));
        }

        #[test]
        fn edit_commit_appends_and_advances_marker() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            fx.amend(&path, "v2\n", "second");

            let history = log(&fx.repo, &path).unwrap();
            assert_eq!(history.head().get(), 2);

            let active = fx.repo.branches().active().unwrap();
            let h = crate::engine::history(&fx.repo, &active, &path);
            assert_eq!(h.synced_revision().unwrap().get(), 2);
        }

        #[test]
        fn rejects_unstaged_paths() {
            let fx = Fixture::new();
            let path = fx.write("a.c", "x\n");

            let err = commit(&fx.repo, &path, "msg").unwrap_err();
            assert!(matches!(err, OpError::NotPending(_)));
            assert_eq!(err.exit_code(), 3);
        }

        #[test]
        fn rejects_identical_content() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "same\n", "first");
            staging::edit(&fx.repo, &path).unwrap();

            let err = commit(&fx.repo, &path, "again").unwrap_err();
            assert!(matches!(err, OpError::NoChangeDetected(_)));

            // Failure appends nothing, and the entry stays pending.
            assert_eq!(log(&fx.repo, &path).unwrap().head().get(), 1);
            assert!(fx.repo.load_pending().unwrap().contains(&path));
        }

        #[test]
        fn rejects_vanished_workspace_file() {
            let fx = Fixture::new();
            let path = fx.write("a.c", "x\n");
            staging::add(&fx.repo, &path).unwrap();
            std::fs::remove_file(fx.repo.paths().workspace_path(&path)).unwrap();

            let err = commit(&fx.repo, &path, "msg").unwrap_err();
            assert!(matches!(err, OpError::MissingWorkspaceFile(_)));
            assert_eq!(err.exit_code(), 4);
        }

        #[test]
        fn revalidates_sync_state_at_commit_time() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            fx.amend(&path, "v2\n", "second");
            staging::edit(&fx.repo, &path).unwrap();

            // Move the marker behind head after staging. The engine
            // refuses sync on pending paths, so adjust storage directly
            // the way a crashed half-sync would look.
            let active = fx.repo.branches().active().unwrap();
            let h = crate::engine::history(&fx.repo, &active, &path);
            h.mark_synced(RevisionNumber::FIRST).unwrap();

            let err = commit(&fx.repo, &path, "third").unwrap_err();
            assert!(matches!(err, OpError::StaleWorkspace { synced: 1, head: 2, .. }));
        }

        #[test]
        fn content_round_trips_exactly() {
            let fx = Fixture::new();
            let content = "line one\nline two\n\ttabbed\n";
            let path = fx.committed("a.c", content, "first");

            commit_sync_roundtrip(&fx, &path, content);
        }

        fn commit_sync_roundtrip(fx: &Fixture, path: &TrackedPath, content: &str) {
            fx.write(path.as_str(), "scratch\n");
            sync(&fx.repo, path, "1").unwrap();
            assert_eq!(fx.read(path), content);
        }
    }

    mod sync_op {
        use super::*;

        #[test]
        fn checks_out_an_older_revision() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            fx.amend(&path, "v2\n", "second");

            let outcome = sync(&fx.repo, &path, "1").unwrap();
            assert_eq!(outcome.revision.get(), 1);
            assert_eq!(outcome.head.get(), 2);
            assert_eq!(fx.read(&path), "v1\n");

            let active = fx.repo.branches().active().unwrap();
            let h = crate::engine::history(&fx.repo, &active, &path);
            assert_eq!(h.synced_revision().unwrap().get(), 1);
        }

        #[test]
        fn head_literal_resolves_to_newest() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            fx.amend(&path, "v2\n", "second");
            sync(&fx.repo, &path, "1").unwrap();

            let outcome = sync(&fx.repo, &path, "HEAD").unwrap();
            assert_eq!(outcome.revision.get(), 2);
            assert_eq!(fx.read(&path), "v2\n");
        }

        #[test]
        fn rejects_pending_paths() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            staging::edit(&fx.repo, &path).unwrap();

            let err = sync(&fx.repo, &path, "1").unwrap_err();
            assert!(matches!(err, OpError::PendingPath(_)));
            assert_eq!(err.exit_code(), 3);
        }

        #[test]
        fn rejects_untracked_paths() {
            let fx = Fixture::new();
            let path = TrackedPath::new("ghost.c").unwrap();

            let err = sync(&fx.repo, &path, "HEAD").unwrap_err();
            assert!(matches!(err, OpError::NotTracked { .. }));
        }

        #[test]
        fn rejects_out_of_range_targets() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");

            let err = sync(&fx.repo, &path, "9").unwrap_err();
            assert!(matches!(
                err,
                OpError::RevisionOutOfRange { requested: 9, head: 1, .. }
            ));
            assert_eq!(err.exit_code(), 4);

            let err = sync(&fx.repo, &path, "0").unwrap_err();
            assert!(matches!(err, OpError::RevisionOutOfRange { requested: 0, .. }));
        }

        #[test]
        fn rejects_non_numeric_targets() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");

            let err = sync(&fx.repo, &path, "newest").unwrap_err();
            assert!(matches!(err, OpError::MalformedRevision(_)));
            assert_eq!(err.exit_code(), 2);
        }

        #[test]
        fn case_sensitive_head_literal() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");

            let err = sync(&fx.repo, &path, "head").unwrap_err();
            assert!(matches!(err, OpError::MalformedRevision(_)));
        }

        #[test]
        fn restores_missing_workspace_file() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            std::fs::remove_file(fx.repo.paths().workspace_path(&path)).unwrap();

            sync(&fx.repo, &path, "HEAD").unwrap();
            assert_eq!(fx.read(&path), "v1\n");
        }
    }

    mod log_op {
        use super::*;

        #[test]
        fn lists_every_revision() {
            let fx = Fixture::new();
            let path = fx.committed("a.c", "v1\n", "first");
            fx.amend(&path, "v2\n", "second");

            let history = log(&fx.repo, &path).unwrap();
            let messages: Vec<_> = history
                .entries()
                .iter()
                .map(|e| e.message.as_str())
                .collect();
            assert_eq!(messages, vec!["first", "second"]);
        }

        #[test]
        fn fails_for_untracked_paths() {
            let fx = Fixture::new();
            let path = TrackedPath::new("ghost.c").unwrap();

            let err = log(&fx.repo, &path).unwrap_err();
            assert!(matches!(err, OpError::NotTracked { .. }));
        }
    }
}
