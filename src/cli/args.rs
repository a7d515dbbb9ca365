//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Vellum - file-granular version control with per-branch histories
#[derive(Parser, Debug)]
#[command(name = "vel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if vel was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a repository in the current directory
    #[command(
        name = "setup",
        long_about = "Create a repository in the current directory.\n\n\
            Writes the .vellum data directory with a default configuration, an \
            empty pending set, and the initial branch \"main\". Run this once \
            per project; running it inside an existing repository (including \
            from a subdirectory of one) fails.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Put a project under version control
    cd ~/src/project
    vel setup

    # Then track your first file
    vel add notes.txt
    vel commit notes.txt \"first draft\""
    )]
    Setup,

    // ========== Staging ==========
    /// Stage new files for their first commit
    #[command(
        name = "add",
        long_about = "Stage files that are not yet under version control.\n\n\
            Each file is validated (it must exist, be a regular file, and not \
            already be tracked or staged) and recorded in the pending set. \
            Nothing is stored until you commit. Files are processed in order; \
            the first ineligible file stops the command, and files staged \
            before it stay staged.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Stage one file
    vel add parser.c

    # Stage several at once
    vel add parser.c lexer.c util.h

    # See what is staged
    vel status"
    )]
    Add {
        /// Files to stage (paths are resolved against the current directory)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },

    /// Open tracked files for editing
    #[command(
        name = "edit",
        long_about = "Stage tracked files for a follow-up commit.\n\n\
            A file can only be opened for edit while its workspace copy is at \
            the head revision; if you synced an older revision, sync back to \
            HEAD first. Files are processed in order with the same \
            stop-at-first-error rule as add.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Open a file, change it, commit the change
    vel edit parser.c
    $EDITOR parser.c
    vel commit parser.c \"handle empty input\"

    # Editing an old revision is rejected
    vel sync parser.c 1
    vel edit parser.c        # fails: workspace is behind head
    vel sync parser.c HEAD
    vel edit parser.c        # fine"
    )]
    Edit {
        /// Tracked files to open for edit
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },

    /// Commit a staged add or edit
    #[command(
        name = "commit",
        long_about = "Turn the pending change for a file into a new revision.\n\n\
            For a staged add this creates the file's history with revision 1. \
            For a staged edit it appends the next revision, provided the \
            content actually changed; committing identical content is \
            rejected. Either way the file leaves the pending set and the \
            workspace is considered synced to the new revision.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Commit a staged file with a message
    vel commit parser.c \"handle empty input\"

    # A no-op edit is rejected
    vel edit parser.c
    vel commit parser.c \"no change\"   # fails: nothing changed"
    )]
    Commit {
        /// File with a pending change
        #[arg(value_name = "FILE")]
        file: String,

        /// Message recorded with the new revision
        #[arg(value_name = "MESSAGE")]
        message: String,
    },

    // ========== Histories ==========
    /// Check out a revision into the workspace
    #[command(
        name = "sync",
        long_about = "Overwrite the workspace copy of a file with a stored \
            revision.\n\n\
            The target is a revision number or the literal HEAD. Syncing is \
            the only way the synced marker moves backward, so this is how you \
            inspect old snapshots. A file with a pending change cannot be \
            synced; commit it first.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Look at the first revision, then come back
    vel sync parser.c 1
    vel sync parser.c HEAD

    # Restore a deleted workspace file
    rm parser.c
    vel sync parser.c HEAD"
    )]
    Sync {
        /// Tracked file to check out
        #[arg(value_name = "FILE")]
        file: String,

        /// Revision number, or HEAD for the newest
        #[arg(value_name = "REVISION")]
        revision: String,
    },

    /// Show the revision history of tracked files
    #[command(
        name = "log",
        long_about = "Print each file's revisions, newest first.\n\n\
            Every line shows the revision number and its message. Multiple \
            files are printed in argument order, each under its own header.",
        after_help = "\
WORKFLOW EXAMPLES:
    # One file
    vel log parser.c

    # Several files at once
    vel log parser.c lexer.c"
    )]
    Log {
        /// Tracked files to show history for
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },

    /// List staged files
    #[command(
        name = "status",
        long_about = "List the pending set in staging order.\n\n\
            Each line is 'A <path>' for a staged add or 'E <path>' for a \
            staged edit. The kind is derived from whether the file already \
            has a history on the active branch.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What is waiting for a commit?
    vel status"
    )]
    Status,

    // ========== Branches ==========
    /// Publish a file's workspace content into another branch
    #[command(
        name = "branch",
        long_about = "Copy the workspace content of a committed file into a \
            branch as a new revision.\n\n\
            The branch is created when it does not exist yet. This is a \
            one-time content copy, not a link: after branching, the histories \
            evolve independently. The active branch does not change. The \
            generated revision message records the source and destination \
            pair.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Fork a file into an experiment branch
    vel branch parser.c experiment
    vel switchbranch experiment

    # Publishing identical content twice is rejected
    vel branch parser.c experiment   # fails: no changes"
    )]
    Branch {
        /// Committed file to publish
        #[arg(value_name = "FILE")]
        file: String,

        /// Destination branch (alphanumeric)
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Change the active branch
    #[command(
        name = "switchbranch",
        long_about = "Make another branch active and rebuild the workspace.\n\n\
            Workspace copies of files tracked on the current branch are \
            removed, then every file tracked on the target branch is checked \
            out at its head revision. The pending set must be empty. \
            Switching to the current branch is allowed and acts as a reset \
            to head.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Move to the experiment branch and back
    vel switchbranch experiment
    vel switchbranch main

    # Reset all workspace files to head
    vel switchbranch main           # while main is active"
    )]
    Switchbranch {
        /// Branch to switch to
        #[arg(value_name = "NAME")]
        name: String,
    },

    // ========== Merge ==========
    /// Write a merge suggestion for a file across branches
    #[command(
        name = "suggest",
        long_about = "Apply the newest change of a file on one branch onto \
            its head on another, as a suggestion.\n\n\
            The change between the source branch's last two revisions is \
            replayed onto the destination head with an exact-context merge. \
            The result is written next to the file with the configured \
            suffix (default .suggest); neither branch history is touched. \
            Blocks whose context cannot be found are skipped and reported \
            as a warning, with the partial result still written.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Carry the latest main change over to the experiment branch
    vel suggest parser.c main experiment
    diff parser.c.suggest parser.c

    # Conflicts warn but still produce the artifact
    vel suggest parser.c main experiment
    # warning: 1 change block(s) could not be applied"
    )]
    Suggest {
        /// Tracked file to merge
        #[arg(value_name = "FILE")]
        file: String,

        /// Branch supplying the change (needs at least two revisions)
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Branch supplying the base text
        #[arg(value_name = "DEST")]
        dest: String,
    },

    // ========== Misc ==========
    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the \
            output to your shell's configuration to enable tab-completion \
            for vel commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    vel completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    vel completion zsh >> ~/.zshrc

    # Fish
    vel completion fish > ~/.config/fish/completions/vel.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
