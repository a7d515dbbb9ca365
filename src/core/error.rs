//! core::error
//!
//! The operation-level error taxonomy.
//!
//! Every engine operation returns [`OpError`] on failure. Each variant
//! belongs to exactly one [`ErrorClass`], and each class maps to a distinct
//! process exit code so callers and scripts can tell input mistakes,
//! precondition violations, missing targets, an uninitialized repository,
//! and data corruption apart.
//!
//! All failures are terminal to the invoking command: nothing retries, and
//! (given the atomic-write discipline in the store layer) nothing is left
//! half-changed.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{BranchName, TrackedPath, TypeError};

/// Broad failure classes, each with its own exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed input: the command never evaluated repository state.
    Usage,
    /// Well-formed input rejected by the current repository state.
    Precondition,
    /// The named file, branch, or revision does not exist.
    NotFound,
    /// No repository in this directory or any parent.
    NotInitialized,
    /// Persisted state is unreadable or inconsistent.
    Corruption,
    /// Locking or I/O failure outside the taxonomy above.
    Environment,
}

impl ErrorClass {
    /// The process exit code reported for this class.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorClass::Usage => 2,
            ErrorClass::Precondition => 3,
            ErrorClass::NotFound => 4,
            ErrorClass::NotInitialized => 5,
            ErrorClass::Corruption => 6,
            ErrorClass::Environment => 1,
        }
    }
}

/// Failure modes of engine operations.
#[derive(Debug, Error)]
pub enum OpError {
    // Usage
    #[error("invalid file path: {0}")]
    InvalidPath(String),

    #[error("invalid revision target: {0}")]
    MalformedRevision(String),

    // Preconditions
    #[error("already inside a repository rooted at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("\"{0}\" is not a regular file")]
    NotRegularFile(TrackedPath),

    #[error("file \"{0}\" is already under version control on branch \"{1}\"")]
    AlreadyTracked(TrackedPath, BranchName),

    #[error("file \"{0}\" already has a pending change")]
    AlreadyPending(TrackedPath),

    #[error("workspace copy of \"{path}\" is at r{synced} but head is r{head}, sync to HEAD first")]
    StaleWorkspace {
        path: TrackedPath,
        synced: u64,
        head: u64,
    },

    #[error("no pending change for file \"{0}\"")]
    NotPending(TrackedPath),

    #[error("file \"{0}\" has no changes to commit")]
    NoChangeDetected(TrackedPath),

    #[error("file \"{0}\" has a pending change, commit it first")]
    PendingPath(TrackedPath),

    #[error("{0} file(s) have pending changes, commit them first")]
    PendingNotEmpty(usize),

    #[error("branch \"{branch}\" has only one revision of \"{path}\", nothing to merge from")]
    NoAncestor {
        path: TrackedPath,
        branch: BranchName,
    },

    #[error("file \"{0}\" is not UTF-8 text")]
    NotText(TrackedPath),

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    // Not found
    #[error("no such file: \"{0}\"")]
    NoSuchFile(TrackedPath),

    #[error("staged file \"{0}\" is missing from the workspace")]
    MissingWorkspaceFile(TrackedPath),

    #[error("file \"{path}\" is not under version control on branch \"{branch}\"")]
    NotTracked {
        path: TrackedPath,
        branch: BranchName,
    },

    #[error("no such branch: \"{0}\"")]
    NoSuchBranch(BranchName),

    #[error("revision {requested} of \"{path}\" is out of range (head is r{head})")]
    RevisionOutOfRange {
        path: TrackedPath,
        requested: u64,
        head: u64,
    },

    // Not initialized
    #[error("not inside a repository (run \"vel setup\" first)")]
    NotInitialized,

    // Corruption
    #[error("repository data corrupted at {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    // Environment
    #[error("repository is locked by another process (lock file: {})", .0.display())]
    LockHeld(PathBuf),

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OpError {
    /// The taxonomy class of this error.
    pub fn class(&self) -> ErrorClass {
        match self {
            OpError::InvalidPath(_) | OpError::MalformedRevision(_) => ErrorClass::Usage,

            OpError::AlreadyInitialized(_)
            | OpError::InvalidBranchName(_)
            | OpError::NotRegularFile(_)
            | OpError::AlreadyTracked(_, _)
            | OpError::AlreadyPending(_)
            | OpError::StaleWorkspace { .. }
            | OpError::NotPending(_)
            | OpError::NoChangeDetected(_)
            | OpError::PendingPath(_)
            | OpError::PendingNotEmpty(_)
            | OpError::NoAncestor { .. }
            | OpError::NotText(_)
            | OpError::ConfigInvalid(_) => ErrorClass::Precondition,

            OpError::NoSuchFile(_)
            | OpError::MissingWorkspaceFile(_)
            | OpError::NotTracked { .. }
            | OpError::NoSuchBranch(_)
            | OpError::RevisionOutOfRange { .. } => ErrorClass::NotFound,

            OpError::NotInitialized => ErrorClass::NotInitialized,

            OpError::Corrupt { .. } => ErrorClass::Corruption,

            OpError::LockHeld(_) | OpError::Io { .. } => ErrorClass::Environment,
        }
    }

    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.class().exit_code()
    }

    /// Wrap an I/O failure with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OpError::Io {
            path: path.into(),
            source,
        }
    }

    /// Flag persisted state at `path` as corrupt.
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        OpError::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<TypeError> for OpError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidBranchName(m) => OpError::InvalidBranchName(m),
            TypeError::InvalidTrackedPath(m) => OpError::InvalidPath(m),
            // Out-of-range numbers carry head context when the engine raises
            // them itself; through this conversion they surface as input
            // errors.
            TypeError::InvalidRevisionNumber(m) | TypeError::InvalidRevisionTarget(m) => {
                OpError::MalformedRevision(m)
            }
            TypeError::InvalidContentHash(m) => OpError::Corrupt {
                path: PathBuf::new(),
                reason: m,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> TrackedPath {
        TrackedPath::new(s).unwrap()
    }

    fn branch(s: &str) -> BranchName {
        BranchName::new(s).unwrap()
    }

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [
            ErrorClass::Usage,
            ErrorClass::Precondition,
            ErrorClass::NotFound,
            ErrorClass::NotInitialized,
            ErrorClass::Corruption,
            ErrorClass::Environment,
        ]
        .map(ErrorClass::exit_code);
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        // 0 is success, never an error code.
        assert!(codes.iter().all(|c| *c != 0));
    }

    #[test]
    fn usage_class() {
        assert_eq!(
            OpError::MalformedRevision("x".into()).class(),
            ErrorClass::Usage
        );
        assert_eq!(OpError::InvalidPath("..".into()).exit_code(), 2);
    }

    #[test]
    fn precondition_class() {
        let errs = [
            OpError::AlreadyTracked(path("f.c"), branch("main")),
            OpError::AlreadyPending(path("f.c")),
            OpError::StaleWorkspace {
                path: path("f.c"),
                synced: 1,
                head: 3,
            },
            OpError::NoChangeDetected(path("f.c")),
            OpError::PendingNotEmpty(2),
            OpError::InvalidBranchName("bad name".into()),
            OpError::NoAncestor {
                path: path("f.c"),
                branch: branch("dev"),
            },
        ];
        for err in errs {
            assert_eq!(err.class(), ErrorClass::Precondition);
            assert_eq!(err.exit_code(), 3);
        }
    }

    #[test]
    fn not_found_class() {
        let errs = [
            OpError::NoSuchFile(path("f.c")),
            OpError::NotTracked {
                path: path("f.c"),
                branch: branch("main"),
            },
            OpError::NoSuchBranch(branch("dev")),
            OpError::RevisionOutOfRange {
                path: path("f.c"),
                requested: 9,
                head: 3,
            },
        ];
        for err in errs {
            assert_eq!(err.class(), ErrorClass::NotFound);
            assert_eq!(err.exit_code(), 4);
        }
    }

    #[test]
    fn initialization_and_corruption_classes() {
        assert_eq!(OpError::NotInitialized.exit_code(), 5);
        assert_eq!(
            OpError::corrupt("/tmp/x/log.json", "bad envelope").exit_code(),
            6
        );
    }

    #[test]
    fn environment_class() {
        assert_eq!(OpError::LockHeld(PathBuf::from("/tmp/lock")).exit_code(), 1);
        let io = OpError::io(
            "/tmp/f",
            std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        );
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn type_errors_map_by_kind() {
        let branch_err: OpError = TypeError::InvalidBranchName("x".into()).into();
        assert_eq!(branch_err.class(), ErrorClass::Precondition);

        let path_err: OpError = TypeError::InvalidTrackedPath("x".into()).into();
        assert_eq!(path_err.class(), ErrorClass::Usage);

        let target_err: OpError = TypeError::InvalidRevisionTarget("x".into()).into();
        assert_eq!(target_err.class(), ErrorClass::Usage);
    }

    #[test]
    fn messages_name_their_subjects() {
        let err = OpError::NotTracked {
            path: path("src/main.c"),
            branch: branch("dev"),
        };
        let msg = err.to_string();
        assert!(msg.contains("src/main.c"));
        assert!(msg.contains("dev"));
    }
}
