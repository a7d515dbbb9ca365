//! core
//!
//! Core domain types, schemas, and repository plumbing for Vellum.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, TrackedPath, RevisionNumber, etc.
//! - [`error`] - The operation error taxonomy and exit-code classes
//! - [`paths`] - Centralized path routing for Vellum storage
//! - [`fsutil`] - Atomic file writes and small filesystem helpers
//! - [`lock`] - Exclusive repository locking
//! - [`config`] - Configuration schema and loading
//! - [`record`] - Self-describing JSON record envelope
//! - [`pending`] - The staged-change (pending) set
//! - [`branches`] - Branch registry and the active-branch pointer
//! - [`repo`] - Repository creation, discovery, and shared access
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Every persisted write is atomic (temp file plus rename)

pub mod branches;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod lock;
pub mod paths;
pub mod pending;
pub mod record;
pub mod repo;
pub mod types;
