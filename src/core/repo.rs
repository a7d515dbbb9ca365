//! core::repo
//!
//! Repository handle: creation, discovery, and shared access.
//!
//! # Architecture
//!
//! [`Repository`] is the explicit context object every engine operation
//! takes. It owns path routing and the loaded configuration; branch
//! registry, pending set, and file histories are views or loads obtained
//! through it. There is no global state anywhere.
//!
//! Discovery walks upward from the working directory until a `.vellum`
//! directory is found, so commands work from any subdirectory of the
//! workspace.

use std::path::{Component, Path, PathBuf};

use crate::core::branches::BranchRegistry;
use crate::core::config::RepoConfig;
use crate::core::error::OpError;
use crate::core::lock::RepoLock;
use crate::core::paths::{RepoPaths, DATA_DIR};
use crate::core::pending::PendingSet;
use crate::core::types::{BranchName, TrackedPath};

/// An open repository.
#[derive(Debug)]
pub struct Repository {
    paths: RepoPaths,
    config: RepoConfig,
}

impl Repository {
    /// Create a new repository rooted at `root`.
    ///
    /// Writes the data directory skeleton, the default configuration,
    /// branch `main` with the active pointer on it, and an empty pending
    /// set.
    ///
    /// # Errors
    ///
    /// Returns `OpError::AlreadyInitialized` if `root` is already inside
    /// a repository (at any ancestor level).
    pub fn setup(root: &Path) -> Result<Self, OpError> {
        let root = canonical(root)?;
        if let Some(existing) = find_root(&root) {
            return Err(OpError::AlreadyInitialized(existing));
        }

        let paths = RepoPaths::new(root);
        paths
            .ensure_dirs()
            .map_err(|e| OpError::io(paths.data_dir(), e))?;

        let config = RepoConfig::default();
        config.save(&paths.config_path())?;

        let main = BranchName::new("main").map_err(OpError::from)?;
        let registry = BranchRegistry::new(&paths);
        registry.create(&main)?;
        registry.set_active(&main)?;

        PendingSet::empty().save(&paths.pending_path())?;

        Ok(Self { paths, config })
    }

    /// Open the repository containing `dir`, walking upward to find it.
    ///
    /// # Errors
    ///
    /// Returns `OpError::NotInitialized` if no ancestor of `dir` holds a
    /// `.vellum` directory.
    pub fn discover(dir: &Path) -> Result<Self, OpError> {
        let start = canonical(dir)?;
        let root = find_root(&start).ok_or(OpError::NotInitialized)?;
        Self::open(&root)
    }

    /// Open a repository rooted exactly at `root`.
    ///
    /// # Errors
    ///
    /// Returns `OpError::NotInitialized` if `root` has no data directory,
    /// or a config error if the configuration fails to load.
    pub fn open(root: &Path) -> Result<Self, OpError> {
        let paths = RepoPaths::new(root.to_path_buf());
        if !paths.data_dir().is_dir() {
            return Err(OpError::NotInitialized);
        }
        let config = RepoConfig::load(&paths.config_path())?;
        Ok(Self { paths, config })
    }

    /// The workspace root.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Path routing for this repository.
    pub fn paths(&self) -> &RepoPaths {
        &self.paths
    }

    /// The loaded configuration.
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// Acquire the exclusive repository lock.
    ///
    /// Held for the duration of any mutating command; released on drop.
    pub fn lock(&self) -> Result<RepoLock, OpError> {
        RepoLock::acquire(&self.paths).map_err(OpError::from)
    }

    /// Branch registry view.
    pub fn branches(&self) -> BranchRegistry<'_> {
        BranchRegistry::new(&self.paths)
    }

    /// Load the pending set.
    pub fn load_pending(&self) -> Result<PendingSet, OpError> {
        PendingSet::load(&self.paths.pending_path())
    }

    /// Persist the pending set (atomically).
    pub fn save_pending(&self, pending: &PendingSet) -> Result<(), OpError> {
        pending.save(&self.paths.pending_path())
    }

    /// Resolve a user-supplied file argument to a repository-relative
    /// tracked path.
    ///
    /// `cwd` must be the (canonical) directory the command was invoked
    /// from; `raw` may be relative to it or absolute. Resolution is
    /// lexical: `.` and `..` are folded without touching the filesystem,
    /// since the target may legitimately not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `OpError::InvalidPath` for paths that escape the workspace
    /// root or reach into the data directory.
    pub fn resolve_path(&self, cwd: &Path, raw: &str) -> Result<TrackedPath, OpError> {
        let joined = if Path::new(raw).is_absolute() {
            PathBuf::from(raw)
        } else {
            cwd.join(raw)
        };
        let normalized = lexical_normalize(&joined);

        let rel = normalized.strip_prefix(self.root()).map_err(|_| {
            OpError::InvalidPath(format!("\"{raw}\" is outside the repository"))
        })?;

        let path = TrackedPath::from_fs_relative(rel)?;
        if path.components().next() == Some(DATA_DIR) {
            return Err(OpError::InvalidPath(format!(
                "\"{raw}\" is inside the {DATA_DIR} data directory"
            )));
        }
        Ok(path)
    }
}

/// Canonicalize a directory path, mapping failures to I/O errors.
fn canonical(dir: &Path) -> Result<PathBuf, OpError> {
    dir.canonicalize().map_err(|e| OpError::io(dir, e))
}

/// Walk upward from `start` looking for a data directory.
fn find_root(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if d.join(DATA_DIR).is_dir() {
            return Some(d.to_path_buf());
        }
        dir = d.parent();
    }
    None
}

/// Fold `.` and `..` components lexically.
///
/// `..` at the root stays at the root, matching shell behavior; escapes
/// are caught later by the strip_prefix check against the workspace root.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other),
        }
    }
    out
}
