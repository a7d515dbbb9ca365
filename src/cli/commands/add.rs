//! add command - Stage new files for version control

use anyhow::Result;

use crate::engine::{staging, Context};
use crate::ui::output::{self, Verbosity};

/// Stage each file for its first commit.
///
/// Files are processed in argument order. The first ineligible file
/// aborts the command with its error; files staged before it stay
/// staged.
pub fn add(ctx: &Context, files: &[String]) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    for raw in files {
        let path = repo.resolve_path(&cwd, raw)?;
        staging::add(&repo, &path)?;
        output::print(format!("Adding file \"{path}\""), verbosity);
    }
    Ok(())
}
