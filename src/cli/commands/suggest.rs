//! suggest command - Write a cross-branch merge suggestion

use anyhow::Result;

use crate::core::error::OpError;
use crate::core::types::BranchName;
use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Merge the newest `source` change of `file` onto `dest`'s head and
/// write the result next to the file.
///
/// Conflicts are a warning, not a failure: the partial result is still
/// written, and the warning is shown even under `--quiet`.
pub fn suggest(ctx: &Context, file: &str, source: &str, dest: &str) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let (repo, cwd) = ctx.open_repo()?;

    let path = repo.resolve_path(&cwd, file)?;
    let source = BranchName::new(source).map_err(OpError::from)?;
    let dest = BranchName::new(dest).map_err(OpError::from)?;
    let outcome = engine::suggest::suggest(&repo, &path, &source, &dest)?;

    output::debug(
        format!(
            "merged r{} of \"{source}\" onto r{} of \"{dest}\"",
            outcome.source_head, outcome.dest_head
        ),
        verbosity,
    );
    output::print(
        format!("Suggestion written to \"{}\"", outcome.artifact),
        verbosity,
    );
    if outcome.conflicts > 0 {
        output::warn(format!(
            "{} change block(s) could not be applied",
            outcome.conflicts
        ));
    }
    Ok(())
}
