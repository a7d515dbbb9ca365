//! sync command - Check out a revision into the workspace

use anyhow::Result;

use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Overwrite the workspace copy of `file` with the stored content of
/// `revision` (a number, or the literal HEAD).
pub fn sync(ctx: &Context, file: &str, revision: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    let path = repo.resolve_path(&cwd, file)?;
    let outcome = engine::commit::sync(&repo, &path, revision)?;

    output::debug(format!("head of \"{path}\" is r{}", outcome.head), verbosity);
    output::print(
        format!("Synced revision {} of file \"{path}\"", outcome.revision),
        verbosity,
    );
    Ok(())
}
