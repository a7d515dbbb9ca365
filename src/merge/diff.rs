//! merge::diff
//!
//! Line-level alignment of two texts via longest common subsequence.
//!
//! # Architecture
//!
//! The alignment is the first half of the suggestion pipeline: it
//! classifies every line of the ancestor/source pair as equal, removed,
//! or added, in order. [`super::apply`] turns runs of non-equal lines
//! into change blocks and applies them to a third text.
//!
//! Lines are borrowed from the input texts; nothing here allocates line
//! content.

/// How one aligned line relates the ancestor to the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignKind {
    /// Present in both sequences.
    Equal,
    /// Present in the ancestor only.
    Removed,
    /// Present in the source only.
    Added,
}

/// One entry of an alignment, in ancestor order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedLine<'a> {
    pub kind: AlignKind,
    pub text: &'a str,
}

/// Split text into lines on `\n`.
///
/// A trailing newline terminates the last line rather than opening an
/// empty one, so `"a\n"` is one line and `"a\n\n"` is two.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').collect()
}

/// Join lines back into text, newline-terminated.
pub fn join_lines(lines: &[&str]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Align `ancestor` against `source` line by line.
///
/// Equal lines appear once; within a run of differences, removed lines
/// come before added ones. The result is deterministic for any pair of
/// inputs.
pub fn align<'a>(ancestor: &[&'a str], source: &[&'a str]) -> Vec<AlignedLine<'a>> {
    // Common prefix and suffix never participate in the LCS table.
    let mut prefix = 0;
    while prefix < ancestor.len() && prefix < source.len() && ancestor[prefix] == source[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < ancestor.len() - prefix
        && suffix < source.len() - prefix
        && ancestor[ancestor.len() - 1 - suffix] == source[source.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let a = &ancestor[prefix..ancestor.len() - suffix];
    let b = &source[prefix..source.len() - suffix];

    let mut out = Vec::with_capacity(ancestor.len() + source.len() - prefix - suffix);
    out.extend(ancestor[..prefix].iter().map(|text| AlignedLine {
        kind: AlignKind::Equal,
        text,
    }));
    align_middle(a, b, &mut out);
    out.extend(ancestor[ancestor.len() - suffix..].iter().map(|text| AlignedLine {
        kind: AlignKind::Equal,
        text,
    }));
    out
}

/// LCS over the trimmed middle, emitted front to back.
///
/// `table[i][j]` holds the LCS length of `a[i..]` against `b[j..]`, so
/// walking forward from (0, 0) reads the alignment off directly. Ties
/// prefer consuming the ancestor line, which keeps removals ahead of
/// additions inside each difference run.
fn align_middle<'a>(a: &[&'a str], b: &[&'a str], out: &mut Vec<AlignedLine<'a>>) {
    let n = a.len();
    let m = b.len();
    let width = m + 1;
    let mut table = vec![0usize; (n + 1) * width];

    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            out.push(AlignedLine {
                kind: AlignKind::Equal,
                text: a[i],
            });
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            out.push(AlignedLine {
                kind: AlignKind::Removed,
                text: a[i],
            });
            i += 1;
        } else {
            out.push(AlignedLine {
                kind: AlignKind::Added,
                text: b[j],
            });
            j += 1;
        }
    }
    out.extend(a[i..].iter().map(|text| AlignedLine {
        kind: AlignKind::Removed,
        text,
    }));
    out.extend(b[j..].iter().map(|text| AlignedLine {
        kind: AlignKind::Added,
        text,
    }));
}
