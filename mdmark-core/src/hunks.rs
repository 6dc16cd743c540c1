//! Unified-diff hunk parsing
//!
//! Consumes zero-context unified diff text and produces the new-side change
//! set plus the deletion map consumed by the annotation driver.

use std::collections::{BTreeMap, BTreeSet};

/// Line-level change information extracted from a unified diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffModel {
    /// New-side line numbers reported as added or modified (1-indexed).
    pub changed: BTreeSet<usize>,
    /// Old-side lines removed immediately before a new-side position, in the
    /// order they appeared in the old document. A key of `len(new) + 1`
    /// holds deletions past the end of the document.
    pub deletions: BTreeMap<usize, Vec<String>>,
}

impl DiffModel {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.deletions.is_empty()
    }
}

/// Parse zero-context unified diff text.
///
/// Malformed or missing hunk headers leave the cursors at zero, which makes
/// the affected `+`/`-` lines unclassified; this never fails. File headers
/// (`+++`/`---`), blank lines, and `\ No newline` markers are skipped.
/// Blank-only deleted lines are dropped.
pub fn parse_unified(diff: &str) -> DiffModel {
    let mut model = DiffModel::default();
    let mut new_cursor: usize = 0;

    for line in diff.lines() {
        if line.starts_with("@@") {
            match parse_hunk_header(line) {
                // A zero-length new range names the line before the gap, so
                // deletions from such a hunk key one line later.
                Some((new_start, 0)) => new_cursor = new_start + 1,
                Some((new_start, _)) => new_cursor = new_start,
                None => new_cursor = 0,
            }
        } else if line.starts_with("+++") || line.starts_with("---") {
            // file headers
        } else if line.starts_with('\\') {
            // "\ No newline at end of file"
        } else if line.starts_with('+') {
            if new_cursor > 0 {
                model.changed.insert(new_cursor);
                new_cursor += 1;
            }
        } else if let Some(removed) = line.strip_prefix('-') {
            // deletions attach to the new-side position they would have
            // occupied; the old-side cursor never feeds the output
            if new_cursor > 0 && !removed.trim().is_empty() {
                model
                    .deletions
                    .entry(new_cursor)
                    .or_default()
                    .push(removed.to_string());
            }
        } else if line.starts_with(' ') {
            // context line
            if new_cursor > 0 {
                new_cursor += 1;
            }
        }
    }

    model
}

/// Parse `@@ -a[,b] +c[,d] @@` into (new start, new count).
fn parse_hunk_header(line: &str) -> Option<(usize, usize)> {
    let rest = line.strip_prefix("@@ -")?;
    let (old_part, rest) = rest.split_once(" +")?;
    let (new_part, _) = rest.split_once(" @@")?;
    parse_range(old_part)?;
    parse_range(new_part)
}

/// Parse `a` or `a,b`; a missing count means 1.
fn parse_range(text: &str) -> Option<(usize, usize)> {
    match text.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((text.parse().ok()?, 1)),
    }
}
