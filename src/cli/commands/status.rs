//! status command - List staged files

use anyhow::Result;

use crate::engine::staging::{self, PendingKind};
use crate::engine::Context;

/// Print the pending set in staging order, one file per line.
///
/// The listing is the requested output, so it prints even under
/// `--quiet`.
pub fn status(ctx: &Context) -> Result<()> {
    let (repo, _cwd) = ctx.open_repo()?;

    for entry in staging::status(&repo)? {
        let tag = match entry.kind {
            PendingKind::Add => "A",
            PendingKind::Edit => "E",
        };
        println!("{tag} {}", entry.path);
    }
    Ok(())
}
