//! cli
//!
//! Command-line interface layer for Vellum.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT perform repository mutations directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! the [`crate::engine`] for execution. All repository state changes flow
//! through the engine's operations.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        quiet: cli.quiet,
        debug: cli.debug,
    };

    commands::dispatch(cli.command, &ctx)
}
