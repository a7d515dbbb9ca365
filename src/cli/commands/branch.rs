//! branch command - Publish a file into another branch

use anyhow::Result;

use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Publish the workspace content of `file` into branch `name`.
///
/// The active branch stays unchanged; the destination gains one
/// revision (its first, when the file was never branched there).
pub fn branch(ctx: &Context, file: &str, name: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    let path = repo.resolve_path(&cwd, file)?;
    let outcome = engine::branching::branch(&repo, &path, name)?;

    if outcome.branch_created {
        output::debug(format!("created branch \"{}\"", outcome.branch), verbosity);
    }
    output::print(
        format!(
            "File \"{path}\" branched to \"{}\" (r{})",
            outcome.branch, outcome.revision
        ),
        verbosity,
    );
    Ok(())
}
