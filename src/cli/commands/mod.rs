//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Calls the engine to execute the command
//! 3. Formats and displays output
//!
//! Handlers do NOT perform repository mutations directly; everything
//! flows through [`crate::engine`] operations, and errors bubble up to
//! `main` for exit-code mapping.

mod add;
mod branch;
mod commit;
mod completion;
mod edit;
mod log_cmd;
mod setup;
mod status;
mod suggest;
mod switchbranch;
mod sync;

// Re-export command functions for testing and direct invocation
pub use add::add;
pub use branch::branch;
pub use commit::commit;
pub use completion::completion;
pub use edit::edit;
pub use log_cmd::log;
pub use setup::setup;
pub use status::status;
pub use suggest::suggest;
pub use switchbranch::switchbranch;
pub use sync::sync;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Setup => setup::setup(ctx),
        Command::Add { files } => add::add(ctx, &files),
        Command::Edit { files } => edit::edit(ctx, &files),
        Command::Commit { file, message } => commit::commit(ctx, &file, &message),
        Command::Sync { file, revision } => sync::sync(ctx, &file, &revision),
        Command::Log { files } => log_cmd::log(ctx, &files),
        Command::Status => status::status(ctx),
        Command::Branch { file, name } => branch::branch(ctx, &file, &name),
        Command::Switchbranch { name } => switchbranch::switchbranch(ctx, &name),
        Command::Suggest { file, source, dest } => suggest::suggest(ctx, &file, &source, &dest),
        Command::Completion { shell } => completion::completion(shell),
    }
}
