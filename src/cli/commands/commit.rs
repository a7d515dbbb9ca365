//! commit command - Turn a pending change into a revision

use anyhow::Result;

use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Commit the staged change for one file.
pub fn commit(ctx: &Context, file: &str, message: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    let path = repo.resolve_path(&cwd, file)?;
    let outcome = engine::commit::commit(&repo, &path, message)?;

    if outcome.created {
        output::debug(format!("created history for \"{path}\""), verbosity);
    }
    output::print(
        format!("File \"{path}\" committed with message \"{message}\""),
        verbosity,
    );
    Ok(())
}
