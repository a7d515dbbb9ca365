//! switchbranch command - Change the active branch

use anyhow::Result;

use crate::core::error::OpError;
use crate::core::types::BranchName;
use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Make `name` the active branch and rebuild the workspace.
pub fn switchbranch(ctx: &Context, name: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, _cwd) = ctx.open_repo()?;

    let target = BranchName::new(name).map_err(OpError::from)?;
    let outcome = engine::branching::switch(&repo, &target)?;

    output::debug(
        format!(
            "removed {} workspace file(s) of \"{}\", restored {} of \"{}\"",
            outcome.removed, outcome.from, outcome.restored, outcome.to
        ),
        verbosity,
    );
    output::print(
        format!("Current branch \"{}\" is now in use", outcome.to),
        verbosity,
    );
    Ok(())
}
