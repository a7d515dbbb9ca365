//! engine
//!
//! Orchestrates the command lifecycle: resolve repository, validate
//! preconditions, mutate storage, report an outcome.
//!
//! # Architecture
//!
//! Every operation takes an explicit [`Repository`](crate::core::repo::Repository)
//! and returns a typed outcome; there is no ambient state. Mutating
//! operations acquire the repository lock for their whole duration, so
//! at most one mutation runs at a time. Read-only operations (`status`,
//! `log`) skip the lock.
//!
//! # Modules
//!
//! - [`staging`] - add, edit, status (the pending set)
//! - [`commit`] - commit, sync, log (revision histories)
//! - [`branching`] - branch publish and switching
//! - [`suggest`] - the advisory three-way merge

use std::path::{Path, PathBuf};

use crate::core::error::OpError;
use crate::core::repo::Repository;
use crate::core::types::{BranchName, TrackedPath};
use crate::store::codec::ContentCodec;
use crate::store::history::FileHistory;

pub mod branching;
pub mod commit;
pub mod staging;
pub mod suggest;

/// Execution context shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Debug logging enabled.
    pub debug: bool,
}

impl Context {
    /// The canonical directory the command operates from.
    pub fn working_dir(&self) -> Result<PathBuf, OpError> {
        let dir = match &self.cwd {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| OpError::io(Path::new("."), e))?,
        };
        dir.canonicalize().map_err(|e| OpError::io(&dir, e))
    }

    /// Discover and open the repository containing the working directory.
    ///
    /// Returns the repository together with the canonical working
    /// directory, which path arguments are resolved against.
    pub fn open_repo(&self) -> Result<(Repository, PathBuf), OpError> {
        let cwd = self.working_dir()?;
        let repo = Repository::discover(&cwd)?;
        Ok((repo, cwd))
    }
}

/// History access for one file on one branch, with the configured codec.
pub(crate) fn history<'a>(
    repo: &'a Repository,
    branch: &'a BranchName,
    path: &'a TrackedPath,
) -> FileHistory<'a> {
    FileHistory::new(
        repo.paths(),
        ContentCodec::new(repo.config().storage.compression),
        branch,
        path,
    )
}
