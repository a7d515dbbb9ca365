//! log command - Show revision histories

use anyhow::Result;

use crate::engine::{self, Context};

/// Print each file's revisions, newest first.
///
/// Output per file: a `<path>:` header, one `r<N> "<message>"` line per
/// revision, then a blank line. The listing is the requested output, so
/// it prints even under `--quiet`. Stops at the first untracked file.
pub fn log(ctx: &Context, files: &[String]) -> Result<()> {
    let (repo, cwd) = ctx.open_repo()?;

    for raw in files {
        let path = repo.resolve_path(&cwd, raw)?;
        let log = engine::commit::log(&repo, &path)?;

        println!("{path}:");
        for entry in log.entries().iter().rev() {
            println!("r{} \"{}\"", entry.number, entry.message);
        }
        println!();
    }
    Ok(())
}
