//! edit command - Open tracked files for editing

use anyhow::Result;

use crate::engine::{staging, Context};
use crate::ui::output::{self, Verbosity};

/// Stage each tracked file for a follow-up commit.
///
/// Same argument handling as `add`: in order, stopping at the first
/// failure, with earlier files keeping their staged state.
pub fn edit(ctx: &Context, files: &[String]) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    for raw in files {
        let path = repo.resolve_path(&cwd, raw)?;
        staging::edit(&repo, &path)?;
        output::print(format!("File \"{path}\" is open for edit"), verbosity);
    }
    Ok(())
}
