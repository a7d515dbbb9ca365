//! store
//!
//! Persistent storage for revision histories.
//!
//! # Modules
//!
//! - [`codec`] - Gzip compression for stored content
//! - [`revlog`] - The per-file revision log record
//! - [`synced`] - The per-file synced-revision marker
//! - [`history`] - Facade over log, marker, and blobs for one file

pub mod codec;
pub mod history;
pub mod revlog;
pub mod synced;
