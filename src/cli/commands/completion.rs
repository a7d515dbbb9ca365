//! completion command - Generate shell completion scripts

use crate::cli::args::{Cli, Shell};
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, shells};

/// Generate shell completion scripts.
///
/// The only command that never touches a repository.
pub fn completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    let out = &mut std::io::stdout();

    match shell {
        Shell::Bash => generate(shells::Bash, &mut cmd, &name, out),
        Shell::Zsh => generate(shells::Zsh, &mut cmd, &name, out),
        Shell::Fish => generate(shells::Fish, &mut cmd, &name, out),
        Shell::PowerShell => generate(shells::PowerShell, &mut cmd, &name, out),
    }

    Ok(())
}
