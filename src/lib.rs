//! Vellum - file-granular version control with per-branch histories
//!
//! Vellum is a single-binary tool for single-user revision control at the
//! granularity of individual files: stage adds and edits, commit numbered
//! revisions per (branch, file), sync any revision back into the
//! workspace, publish files into other branches, and generate advisory
//! cross-branch merge suggestions.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Command operations over an open repository
//! - [`core`] - Domain types, persistent records, repository handle
//! - [`store`] - Per-file revision histories and content codec
//! - [`merge`] - The exact-context three-way merge
//! - [`ui`] - User-facing output utilities
//!
//! # Correctness Invariants
//!
//! Vellum maintains the following invariants:
//!
//! 1. Committed revisions are immutable and numbered contiguously from 1
//! 2. Retrieval reproduces committed content byte-for-byte
//! 3. Every persisted write is atomic, and content is stored before the
//!    log entry that references it; an interrupted command can orphan a
//!    blob but never break a history
//! 4. At most one mutating command runs at a time per repository

pub mod cli;
pub mod core;
pub mod engine;
pub mod merge;
pub mod store;
pub mod ui;
