//! setup command - Create a repository

use anyhow::Result;

use crate::core::repo::Repository;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Create a repository rooted at the working directory.
///
/// Fails when the directory (or any of its ancestors) already holds one.
pub fn setup(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let dir = ctx.working_dir()?;
    let repo = Repository::setup(&dir)?;

    output::print(
        format!("Repository created at {}", repo.root().display()),
        verbosity,
    );
    Ok(())
}
