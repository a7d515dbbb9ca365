//! core::fsutil
//!
//! Small filesystem helpers shared by the store and engine layers.
//!
//! The one rule enforced here: state is never written in place. Every write
//! lands in a temporary file in the destination directory and is renamed
//! over the target, so readers observe either the old bytes or the new
//! bytes, never a torn file. This covers the four pieces of state a crash
//! must not tear apart: revision logs, synced markers, the pending set,
//! and stored revision content (plus workspace files, which get the same
//! treatment for free).

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::error::OpError;

/// Atomically replace the file at `target` with `bytes`.
///
/// The parent directory is created if missing. The temporary file is
/// created in the same directory as `target` so the final rename never
/// crosses a filesystem boundary.
///
/// # Errors
///
/// Returns `OpError::Io` on any filesystem failure.
pub fn write_atomic(target: &Path, bytes: &[u8]) -> Result<(), OpError> {
    let dir = target.parent().ok_or_else(|| {
        OpError::io(
            target,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "target has no parent"),
        )
    })?;
    std::fs::create_dir_all(dir).map_err(|e| OpError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| OpError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| OpError::io(target, e))?;
    tmp.as_file().sync_all().map_err(|e| OpError::io(target, e))?;
    tmp.persist(target)
        .map_err(|e| OpError::io(target, e.error))?;
    Ok(())
}

/// Read a whole file into memory.
///
/// # Errors
///
/// Returns `OpError::Io` on any filesystem failure, including absence;
/// callers that treat absence specially should test for the file first or
/// match on the error kind.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, OpError> {
    std::fs::read(path).map_err(|e| OpError::io(path, e))
}

/// Whether `path` names an existing regular file (not a directory or link
/// target of some other kind).
pub fn is_regular_file(path: &Path) -> bool {
    path.is_file()
}
