//! merge::apply
//!
//! Change-block extraction and application against a destination text.
//!
//! # Architecture
//!
//! Runs of non-equal lines in an alignment become change blocks, each
//! padded with up to [`CONTEXT_LINES`] equal lines on either side. A
//! block carries a search segment (context plus removed lines) and a
//! replacement segment (context plus added lines). Application scans
//! the destination with a forward-only cursor: each block is placed at
//! the first exact match of its search segment at or after the cursor,
//! greedily and without backtracking. A block whose search segment has
//! no such match is a conflict; it changes nothing, and the cursor
//! stays where it was so later blocks still get their chance.

use crate::merge::diff::{AlignKind, AlignedLine};

/// Equal-context lines carried on each side of a change block.
pub const CONTEXT_LINES: usize = 2;

/// One applicable difference between ancestor and source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBlock<'a> {
    /// Lines to locate in the destination: leading context, removed
    /// lines, trailing context.
    pub search: Vec<&'a str>,
    /// Lines to substitute: leading context, added lines, trailing
    /// context.
    pub replacement: Vec<&'a str>,
}

/// Result of applying change blocks to a destination text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome<'a> {
    /// The destination lines after all placeable blocks were applied.
    pub lines: Vec<&'a str>,
    /// Number of blocks whose search segment had no match.
    pub conflicts: usize,
}

/// Group an alignment into context-padded change blocks, in order.
///
/// Context is taken only from equal lines and is clipped both at the
/// sequence boundaries and at neighboring blocks, so two blocks
/// separated by a single equal line each carry that one line.
pub fn change_blocks<'a>(
    alignment: &[AlignedLine<'a>],
    context: usize,
) -> Vec<ChangeBlock<'a>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < alignment.len() {
        if alignment[i].kind == AlignKind::Equal {
            i += 1;
            continue;
        }
        let start = i;
        let mut end = i;
        while end < alignment.len() && alignment[end].kind != AlignKind::Equal {
            end += 1;
        }

        let mut leading = Vec::new();
        let mut k = start;
        while k > 0 && leading.len() < context && alignment[k - 1].kind == AlignKind::Equal {
            k -= 1;
            leading.push(alignment[k].text);
        }
        leading.reverse();

        let mut trailing = Vec::new();
        let mut k = end;
        while k < alignment.len() && trailing.len() < context && alignment[k].kind == AlignKind::Equal
        {
            trailing.push(alignment[k].text);
            k += 1;
        }

        let removed = alignment[start..end]
            .iter()
            .filter(|l| l.kind == AlignKind::Removed)
            .map(|l| l.text);
        let added = alignment[start..end]
            .iter()
            .filter(|l| l.kind == AlignKind::Added)
            .map(|l| l.text);

        let mut search = leading.clone();
        search.extend(removed);
        search.extend(trailing.iter().copied());

        let mut replacement = leading;
        replacement.extend(added);
        replacement.extend(trailing);

        blocks.push(ChangeBlock {
            search,
            replacement,
        });
        i = end;
    }
    blocks
}

/// Apply blocks to `dst` with a forward-only cursor.
pub fn apply_blocks<'a>(dst: &[&'a str], blocks: &[ChangeBlock<'a>]) -> MergeOutcome<'a> {
    let mut lines: Vec<&'a str> = dst.to_vec();
    let mut cursor = 0usize;
    let mut conflicts = 0usize;

    for block in blocks {
        match find_run(&lines, cursor, &block.search) {
            Some(position) => {
                lines.splice(
                    position..position + block.search.len(),
                    block.replacement.iter().copied(),
                );
                cursor = position + block.replacement.len();
            }
            None => conflicts += 1,
        }
    }

    MergeOutcome { lines, conflicts }
}

/// First position at or after `cursor` where `search` occurs contiguously.
///
/// The scan upper bound is `lines.len() - search.len()`, inclusive. An
/// empty search segment matches immediately at the cursor.
fn find_run(lines: &[&str], cursor: usize, search: &[&str]) -> Option<usize> {
    if search.is_empty() {
        return (cursor <= lines.len()).then_some(cursor);
    }
    if search.len() > lines.len() {
        return None;
    }
    let last = lines.len() - search.len();
    (cursor..=last).find(|&p| lines[p..p + search.len()] == *search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::diff::align;

    fn blocks_for<'a>(ancestor: &[&'a str], source: &[&'a str]) -> Vec<ChangeBlock<'a>> {
        change_blocks(&align(ancestor, source), CONTEXT_LINES)
    }

    mod blocks {
        use super::*;

        #[test]
        fn no_differences_no_blocks() {
            let lines = ["a", "b"];
            assert!(blocks_for(&lines, &lines).is_empty());
        }

        #[test]
        fn replacement_block_carries_context() {
            let blocks = blocks_for(&["A", "B", "C"], &["A", "X", "C"]);
            assert_eq!(blocks.len(), 1);
            assert_eq!(blocks[0].search, vec!["A", "B", "C"]);
            assert_eq!(blocks[0].replacement, vec!["A", "X", "C"]);
        }

        #[test]
        fn context_clipped_at_boundaries() {
            let blocks = blocks_for(&["B"], &["X"]);
            assert_eq!(blocks[0].search, vec!["B"]);
            assert_eq!(blocks[0].replacement, vec!["X"]);
        }

        #[test]
        fn context_limited_to_two_lines() {
            let blocks = blocks_for(
                &["1", "2", "3", "old", "4", "5", "6"],
                &["1", "2", "3", "new", "4", "5", "6"],
            );
            assert_eq!(blocks[0].search, vec!["2", "3", "old", "4", "5"]);
            assert_eq!(blocks[0].replacement, vec!["2", "3", "new", "4", "5"]);
        }

        #[test]
        fn close_blocks_share_the_separating_line() {
            let blocks = blocks_for(&["a", "mid", "b"], &["x", "mid", "y"]);
            assert_eq!(blocks.len(), 2);
            assert_eq!(blocks[0].search, vec!["a", "mid"]);
            assert_eq!(blocks[0].replacement, vec!["x", "mid"]);
            assert_eq!(blocks[1].search, vec!["mid", "b"]);
            assert_eq!(blocks[1].replacement, vec!["mid", "y"]);
        }

        #[test]
        fn insertion_block_searches_context_only() {
            let blocks = blocks_for(&["a", "b"], &["a", "new", "b"]);
            assert_eq!(blocks[0].search, vec!["a", "b"]);
            assert_eq!(blocks[0].replacement, vec!["a", "new", "b"]);
        }

        #[test]
        fn empty_ancestor_yields_contextless_block() {
            let blocks = blocks_for(&[], &["x", "y"]);
            assert_eq!(blocks.len(), 1);
            assert!(blocks[0].search.is_empty());
            assert_eq!(blocks[0].replacement, vec!["x", "y"]);
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn clean_application() {
            let blocks = blocks_for(&["A", "B", "C"], &["A", "X", "C"]);
            let outcome = apply_blocks(&["A", "B", "C", "D"], &blocks);
            assert_eq!(outcome.lines, vec!["A", "X", "C", "D"]);
            assert_eq!(outcome.conflicts, 0);
        }

        #[test]
        fn unmatched_block_is_a_conflict_and_leaves_dst_alone() {
            let blocks = blocks_for(&["A", "B", "C"], &["A", "X", "C"]);
            let outcome = apply_blocks(&["Z", "Q", "R", "D"], &blocks);
            assert_eq!(outcome.lines, vec!["Z", "Q", "R", "D"]);
            assert_eq!(outcome.conflicts, 1);
        }

        #[test]
        fn cursor_only_moves_forward() {
            // Second block's search exists only before the first match
            // point, so it cannot be placed.
            let blocks = vec![
                ChangeBlock {
                    search: vec!["m"],
                    replacement: vec!["M"],
                },
                ChangeBlock {
                    search: vec!["a"],
                    replacement: vec!["A"],
                },
            ];
            let outcome = apply_blocks(&["a", "m"], &blocks);
            assert_eq!(outcome.lines, vec!["a", "M"]);
            assert_eq!(outcome.conflicts, 1);
        }

        #[test]
        fn conflict_does_not_advance_cursor() {
            let blocks = vec![
                ChangeBlock {
                    search: vec!["missing"],
                    replacement: vec!["whatever"],
                },
                ChangeBlock {
                    search: vec!["a"],
                    replacement: vec!["A"],
                },
            ];
            let outcome = apply_blocks(&["a", "b"], &blocks);
            assert_eq!(outcome.lines, vec!["A", "b"]);
            assert_eq!(outcome.conflicts, 1);
        }

        #[test]
        fn match_at_final_position_is_found() {
            let blocks = vec![ChangeBlock {
                search: vec!["y", "z"],
                replacement: vec!["Y", "Z"],
            }];
            let outcome = apply_blocks(&["x", "y", "z"], &blocks);
            assert_eq!(outcome.lines, vec!["x", "Y", "Z"]);
            assert_eq!(outcome.conflicts, 0);
        }

        #[test]
        fn search_longer_than_destination_conflicts() {
            let blocks = vec![ChangeBlock {
                search: vec!["a", "b", "c"],
                replacement: vec!["x"],
            }];
            let outcome = apply_blocks(&["a", "b"], &blocks);
            assert_eq!(outcome.conflicts, 1);
            assert_eq!(outcome.lines, vec!["a", "b"]);
        }

        #[test]
        fn empty_search_inserts_at_cursor() {
            let blocks = vec![ChangeBlock {
                search: vec![],
                replacement: vec!["new"],
            }];
            let outcome = apply_blocks(&["tail"], &blocks);
            assert_eq!(outcome.lines, vec!["new", "tail"]);
            assert_eq!(outcome.conflicts, 0);
        }

        #[test]
        fn replacement_can_change_length() {
            let blocks = blocks_for(&["a", "b", "c"], &["a", "b1", "b2", "b3", "c"]);
            let outcome = apply_blocks(&["a", "b", "c"], &blocks);
            assert_eq!(outcome.lines, vec!["a", "b1", "b2", "b3", "c"]);
            assert_eq!(outcome.conflicts, 0);
        }

        #[test]
        fn second_block_matches_after_first_replacement() {
            let ancestor = ["a", "1", "b", "c", "d", "e", "2", "f"];
            let source = ["a", "one", "b", "c", "d", "e", "two", "f"];
            let blocks = blocks_for(&ancestor, &source);
            assert_eq!(blocks.len(), 2);

            let outcome = apply_blocks(&ancestor, &blocks);
            assert_eq!(outcome.lines, source);
            assert_eq!(outcome.conflicts, 0);
        }

        #[test]
        fn overlapping_contexts_leave_second_block_behind_cursor() {
            // Three equal lines between two edits: the trailing context
            // of the first block and the leading context of the second
            // overlap on the middle line. Placing the first block moves
            // the cursor past the second block's only match, so the
            // greedy pass records it as a conflict.
            let ancestor = ["a", "1", "b", "c", "d", "2", "e"];
            let source = ["a", "one", "b", "c", "d", "two", "e"];
            let blocks = blocks_for(&ancestor, &source);
            assert_eq!(blocks.len(), 2);

            let outcome = apply_blocks(&ancestor, &blocks);
            assert_eq!(
                outcome.lines,
                vec!["a", "one", "b", "c", "d", "2", "e"]
            );
            assert_eq!(outcome.conflicts, 1);
        }
    }
}
