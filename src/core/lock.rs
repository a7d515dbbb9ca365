//! core::lock
//!
//! Exclusive repository lock for mutating commands.
//!
//! # Architecture
//!
//! The repo lock ensures only one vellum process can mutate the repository
//! at a time. The engine is single-user by design, but nothing stops a user
//! from running two commands in two terminals; the lock turns that race
//! into a clean failure instead of interleaved state writes.
//!
//! # Storage
//!
//! - `<root>/.vellum/lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held for the entire mutating command
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```ignore
//! use vellum::core::lock::RepoLock;
//! use vellum::core::paths::RepoPaths;
//! use std::path::PathBuf;
//!
//! let paths = RepoPaths::new(PathBuf::from("/repo"));
//! let lock = RepoLock::acquire(&paths)?;
//!
//! // Perform operations while holding lock
//! // ...
//!
//! // Lock automatically released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::core::error::OpError;
use crate::core::paths::RepoPaths;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("repository is locked by another vellum process")]
    AlreadyLocked(PathBuf),

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

impl From<LockError> for OpError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyLocked(path) => OpError::LockHeld(path),
            other => OpError::io(
                PathBuf::new(),
                std::io::Error::new(std::io::ErrorKind::Other, other.to_string()),
            ),
        }
    }
}

/// An exclusive lock on the repository.
///
/// The lock is automatically released when this guard is dropped (RAII
/// pattern). This ensures the lock is always released, even if the
/// operation panics.
///
/// # Example
///
/// ```ignore
/// use vellum::core::lock::RepoLock;
///
/// let lock = RepoLock::acquire(&paths)?;
/// assert!(lock.is_held());
///
/// // Lock is released when `lock` goes out of scope
/// ```
#[derive(Debug)]
pub struct RepoLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    /// When this is Some, we hold the lock.
    file: Option<File>,
}

impl RepoLock {
    /// Attempt to acquire the repository lock.
    ///
    /// This uses OS-level file locking via `fs2`, which works across
    /// processes. The lock is non-blocking - if another process holds
    /// the lock, this returns `LockError::AlreadyLocked` immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(paths: &RepoPaths) -> Result<Self, LockError> {
        let data_dir = paths.data_dir();
        fs::create_dir_all(&data_dir).map_err(|e| {
            LockError::CreateFailed(format!("cannot create {}: {}", data_dir.display(), e))
        })?;

        let path = paths.lock_path();

        // Open or create the lock file
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        // Try to acquire an exclusive lock (non-blocking)
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Err(LockError::AlreadyLocked(path))
            }
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Check if the lock is currently held.
    ///
    /// Returns `true` if this guard still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// This is called automatically on drop, but can be called early
    /// if you need to release the lock before the guard goes out of scope.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for RepoLock {
    fn drop(&mut self) {
        // Best-effort release on drop - ignore errors since we're dropping
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}
