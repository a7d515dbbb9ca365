//! core::paths
//!
//! Centralized path routing for repository storage locations.
//!
//! # Architecture
//!
//! All persistent state lives under `<root>/.vellum/`. Every location is
//! computed here so layout changes stay in one file.
//!
//! **Hard rule:** no code outside this module may join `.vellum` path
//! segments itself. All storage paths go through [`RepoPaths`].
//!
//! # Storage Layout
//!
//! - `config.toml` - Repository configuration
//! - `lock` - Exclusive lock file
//! - `active.json` - Active branch pointer
//! - `pending.json` - Pending (staged) file set
//! - `branches/<branch>/<path...>/` - One directory per tracked file,
//!   replicating the file's workspace path, holding `log.json`,
//!   `synced.json`, and one `r<N>.gz` blob per revision
//!
//! # Example
//!
//! ```
//! use vellum::core::paths::RepoPaths;
//! use vellum::core::types::{BranchName, TrackedPath};
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new(PathBuf::from("/repo"));
//! let branch = BranchName::new("main").unwrap();
//! let file = TrackedPath::new("src/main.c").unwrap();
//!
//! assert_eq!(
//!     paths.revision_log_path(&branch, &file),
//!     PathBuf::from("/repo/.vellum/branches/main/src/main.c/log.json")
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::{BranchName, RevisionNumber, TrackedPath};

/// Name of the repository data directory under the root.
pub const DATA_DIR: &str = ".vellum";

/// File name of a revision log inside a history directory.
///
/// A directory under `branches/<branch>/` is a file history iff it directly
/// contains a regular file with this name; enumeration relies on that test,
/// so nothing else in a history directory may use the name.
pub const LOG_FILE: &str = "log.json";

/// File name of the synced-revision marker inside a history directory.
pub const SYNCED_FILE: &str = "synced.json";

/// Centralized path routing for repository storage.
///
/// # Invariants
///
/// - `root` is the workspace root (the directory containing `.vellum/`)
/// - Tracked paths resolve under both the workspace root (working copy)
///   and each branch directory (stored history) with the same components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPaths {
    root: PathBuf,
}

impl RepoPaths {
    /// Create path routing for a repository rooted at `root`.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The workspace root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // =========================================================================
    // Repository-scoped paths
    // =========================================================================

    /// The repository data directory, `<root>/.vellum`.
    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    /// The repository configuration file, `<root>/.vellum/config.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }

    /// The repository lock file, `<root>/.vellum/lock`.
    pub fn lock_path(&self) -> PathBuf {
        self.data_dir().join("lock")
    }

    /// The active branch pointer record, `<root>/.vellum/active.json`.
    pub fn active_branch_path(&self) -> PathBuf {
        self.data_dir().join("active.json")
    }

    /// The pending set record, `<root>/.vellum/pending.json`.
    pub fn pending_path(&self) -> PathBuf {
        self.data_dir().join("pending.json")
    }

    /// The directory holding one subdirectory per branch.
    pub fn branches_dir(&self) -> PathBuf {
        self.data_dir().join("branches")
    }

    /// The storage directory of one branch.
    pub fn branch_dir(&self, branch: &BranchName) -> PathBuf {
        self.branches_dir().join(branch.as_str())
    }

    // =========================================================================
    // Per (branch, file) history paths
    // =========================================================================

    /// The history directory for `path` on `branch`.
    ///
    /// Mirrors the tracked path under the branch directory, with the file
    /// name itself becoming a directory.
    pub fn history_dir(&self, branch: &BranchName, path: &TrackedPath) -> PathBuf {
        path.to_fs_path(&self.branch_dir(branch))
    }

    /// The revision log of `path` on `branch`.
    pub fn revision_log_path(&self, branch: &BranchName, path: &TrackedPath) -> PathBuf {
        self.history_dir(branch, path).join(LOG_FILE)
    }

    /// The synced-revision marker of `path` on `branch`.
    pub fn synced_marker_path(&self, branch: &BranchName, path: &TrackedPath) -> PathBuf {
        self.history_dir(branch, path).join(SYNCED_FILE)
    }

    /// The stored content blob of one revision of `path` on `branch`.
    pub fn revision_blob_path(
        &self,
        branch: &BranchName,
        path: &TrackedPath,
        revision: RevisionNumber,
    ) -> PathBuf {
        self.history_dir(branch, path)
            .join(format!("r{}.gz", revision.get()))
    }

    // =========================================================================
    // Workspace paths
    // =========================================================================

    /// The working copy of a tracked file, `<root>/<path>`.
    pub fn workspace_path(&self, path: &TrackedPath) -> PathBuf {
        path.to_fs_path(&self.root)
    }

    /// Ensure the data directory skeleton exists.
    ///
    /// Creates `<root>/.vellum/` and `<root>/.vellum/branches/` if needed.
    ///
    /// # Errors
    ///
    /// Returns an IO error if directory creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.data_dir())?;
        std::fs::create_dir_all(self.branches_dir())?;
        Ok(())
    }
}
