//! core::branches
//!
//! Branch registry and active-branch pointer.
//!
//! # Semantics
//!
//! A branch exists iff its directory exists under `.vellum/branches/`.
//! There is no separate membership record to drift out of step with the
//! histories stored inside the directory. The active branch is a single
//! JSON record (`active.json`) updated atomically on switch.
//!
//! Branch directories also answer "which files are tracked here": a
//! directory that directly contains a regular `log.json` file is a file
//! history, and its path relative to the branch directory is the tracked
//! path. The regular-file test matters: a tracked file that is itself
//! named `log.json` produces a *directory* of that name one level up,
//! which must not terminate the walk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::OpError;
use crate::core::paths::{RepoPaths, LOG_FILE};
use crate::core::record::{self, Record, RecordError};
use crate::core::types::{BranchName, TrackedPath};

/// The kind identifier for the active branch record.
pub const ACTIVE_KIND: &str = "vellum.active-branch";

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// The persisted active-branch pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActiveBranchRecord {
    kind: String,
    schema_version: u32,
    name: BranchName,
}

impl ActiveBranchRecord {
    fn new(name: BranchName) -> Self {
        Self {
            kind: ACTIVE_KIND.to_string(),
            schema_version: SCHEMA_VERSION,
            name,
        }
    }
}

impl Record for ActiveBranchRecord {
    const KIND: &'static str = ACTIVE_KIND;
    const VERSION: u32 = SCHEMA_VERSION;

    fn envelope(&self) -> (&str, u32) {
        (&self.kind, self.schema_version)
    }

    fn validate_body(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Branch membership and the active-branch pointer.
///
/// Borrowing path routing keeps the registry a pure view: all state lives
/// on disk, and every method reads or writes it directly.
#[derive(Debug)]
pub struct BranchRegistry<'a> {
    paths: &'a RepoPaths,
}

impl<'a> BranchRegistry<'a> {
    /// Create a registry view over a repository's paths.
    pub fn new(paths: &'a RepoPaths) -> Self {
        Self { paths }
    }

    /// The active branch.
    ///
    /// # Errors
    ///
    /// A missing or unreadable pointer record is corruption: `setup`
    /// writes it, so absence means damaged state.
    pub fn active(&self) -> Result<BranchName, OpError> {
        let path = self.paths.active_branch_path();
        let rec: ActiveBranchRecord = record::try_load(&path)?
            .ok_or_else(|| OpError::corrupt(&path, "active branch record is missing"))?;
        Ok(rec.name)
    }

    /// Point the active branch at `name` (atomically).
    pub fn set_active(&self, name: &BranchName) -> Result<(), OpError> {
        record::save(
            &self.paths.active_branch_path(),
            &ActiveBranchRecord::new(name.clone()),
        )
    }

    /// Whether branch `name` exists.
    pub fn exists(&self, name: &BranchName) -> bool {
        self.paths.branch_dir(name).is_dir()
    }

    /// Create branch `name` (empty). Creating an existing branch is a
    /// no-op.
    pub fn create(&self, name: &BranchName) -> Result<(), OpError> {
        let dir = self.paths.branch_dir(name);
        std::fs::create_dir_all(&dir).map_err(|e| OpError::io(dir, e))
    }

    /// All branches, sorted by name.
    ///
    /// # Errors
    ///
    /// A directory entry under `branches/` that is not a valid branch
    /// name is corruption.
    pub fn list(&self) -> Result<Vec<BranchName>, OpError> {
        let dir = self.paths.branches_dir();
        let mut names = Vec::new();
        let entries = std::fs::read_dir(&dir).map_err(|e| OpError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| OpError::io(&dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let raw = entry.file_name();
            let raw = raw
                .to_str()
                .ok_or_else(|| OpError::corrupt(entry.path(), "branch name is not UTF-8"))?;
            let name = BranchName::new(raw)
                .map_err(|e| OpError::corrupt(entry.path(), e.to_string()))?;
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    /// All files with a history on `branch`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns `OpError::NoSuchBranch` if the branch does not exist, and
    /// corruption for non-UTF-8 or otherwise invalid stored paths.
    pub fn tracked_files(&self, branch: &BranchName) -> Result<Vec<TrackedPath>, OpError> {
        let root = self.paths.branch_dir(branch);
        if !root.is_dir() {
            return Err(OpError::NoSuchBranch(branch.clone()));
        }
        let mut found = Vec::new();
        walk_histories(&root, &root, &mut found)?;
        found.sort();
        Ok(found)
    }
}

/// Recursive walk collecting history directories under `dir`.
fn walk_histories(
    root: &Path,
    dir: &Path,
    found: &mut Vec<TrackedPath>,
) -> Result<(), OpError> {
    if dir.join(LOG_FILE).is_file() {
        let rel = dir
            .strip_prefix(root)
            .map_err(|_| OpError::corrupt(dir, "history directory outside branch"))?;
        let path = TrackedPath::from_fs_relative(rel)
            .map_err(|e| OpError::corrupt(dir, e.to_string()))?;
        found.push(path);
        // A history directory holds only revision artifacts; nothing
        // tracked can nest below it.
        return Ok(());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| OpError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| OpError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk_histories(root, &path, found)?;
        }
    }
    Ok(())
}
