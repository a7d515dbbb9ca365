//! merge
//!
//! The three-way merge used by `suggest`.
//!
//! # Architecture
//!
//! - [`diff`] - LCS line alignment of ancestor against source head
//! - [`apply`] - change blocks and forward-cursor application to the
//!   destination head
//!
//! The merge is advisory: it produces a suggested text plus a conflict
//! count and never touches committed history. Given the same three
//! inputs it always produces the same output.

pub mod apply;
pub mod diff;

pub use apply::CONTEXT_LINES;

/// Output of a three-way merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Change blocks that could not be located in the destination.
    pub conflicts: usize,
    /// The suggested destination text, newline-terminated.
    pub merged: String,
}

/// Merge the source-side change (`ancestor` to `source`) onto `dest`.
pub fn three_way(ancestor: &str, source: &str, dest: &str) -> MergeResult {
    let ancestor_lines = diff::split_lines(ancestor);
    let source_lines = diff::split_lines(source);
    let dest_lines = diff::split_lines(dest);

    let alignment = diff::align(&ancestor_lines, &source_lines);
    let blocks = apply::change_blocks(&alignment, CONTEXT_LINES);
    let outcome = apply::apply_blocks(&dest_lines, &blocks);

    MergeResult {
        conflicts: outcome.conflicts,
        merged: diff::join_lines(&outcome.lines),
    }
}
