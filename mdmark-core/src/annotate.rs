//! Annotation driver
//!
//! Walks the new document once, consulting the parsed diff and the
//! structural classifier, and emits change banners, inline wraps, and the
//! trailing provenance footer.

use crate::classify::{self, TableRegion};
use crate::diff::{DiffSource, SimilarDiff};
use crate::document::{join_lines, split_lines, LineEnding};
use crate::hunks::{self, DiffModel};
use crate::markers;
use crate::strip;

/// Run state for the current contiguous block of changed lines.
///
/// Unchanged lines, table-region boundaries, and figure lines all reset the
/// state to `Idle`, so every fresh context opens its own banner or chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Idle,
    /// A generic banner is open for the current run.
    GenericRun,
    /// A list run is open and the inline chip has already been emitted.
    ListRun,
}

/// Annotate `new` against `old` using the in-process line differ.
pub fn annotate(old: &str, new: &str) -> String {
    annotate_with(old, new, &SimilarDiff)
}

/// Annotate with a caller-supplied diff source.
///
/// Any pre-existing markers in `new` are stripped first, so annotating is
/// idempotent. A failing diff source degrades to an empty diff (no detected
/// changes) rather than failing the document.
pub fn annotate_with(old: &str, new: &str, differ: &dyn DiffSource) -> String {
    let ending = LineEnding::detect(new);
    let clean = strip::strip(new);

    let old_normalized = old.replace("\r\n", "\n");
    let clean_normalized = clean.replace("\r\n", "\n");
    let diff_text = match differ.unified_diff(&old_normalized, &clean_normalized) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("diff source unavailable, treating document as unchanged: {err:#}");
            String::new()
        }
    };

    let model = hunks::parse_unified(&diff_text);
    let lines = split_lines(&clean);
    let annotated = drive(&lines, &model);
    join_lines(&annotated, ending)
}

fn drive(lines: &[String], model: &DiffModel) -> Vec<String> {
    let regions = classify::table_regions(lines);
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 8);
    let mut state = RunState::Idle;
    let mut prev_region: Option<TableRegion> = None;

    for (idx, line) in lines.iter().enumerate() {
        let n = idx + 1;
        let region = classify::region_at(&regions, n);
        if region != prev_region {
            // crossing a table boundary always closes the current run
            state = RunState::Idle;
            prev_region = region;
        }
        if let Some(r) = region {
            if n == r.start && region_changed(r, model) {
                out.push(markers::TABLE_BANNER.to_string());
            }
        }

        let mut deletions: &[String] = model
            .deletions
            .get(&n)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let changed = model.changed.contains(&n);

        if !changed && deletions.is_empty() {
            out.push(line.clone());
            state = RunState::Idle;
            continue;
        }

        // figure handling outranks table context, table outranks list context
        let line_is_image = classify::is_image(line);
        if (changed && line_is_image) || deletions.iter().any(|d| classify::is_image(d)) {
            out.push(markers::FIGURE_BANNER.to_string());
            for deleted in deletions {
                out.push(markers::figure_old(deleted));
            }
            state = RunState::Idle;
            if changed && line_is_image {
                out.push(markers::figure_new(line));
                continue;
            }
            if !changed {
                out.push(line.clone());
                continue;
            }
            // a changed non-figure line follows the deleted figure; it is
            // handled below with the deletions already consumed
            deletions = &[];
        }

        if region.is_some() {
            let mut paired_old: Option<&str> = None;
            if changed && !classify::is_table_separator(line) {
                if let Some(first) = deletions.first() {
                    if classify::is_table_row(first) && !classify::is_table_separator(first) {
                        paired_old = Some(first.as_str());
                        deletions = &deletions[1..];
                    }
                }
            }
            for deleted in deletions {
                if !classify::is_table_separator(deleted) {
                    out.push(markers::wrap_table_row(deleted, true));
                }
            }
            if changed && !classify::is_table_separator(line) {
                out.push(markers::wrap_changed_table_row(line, paired_old));
            } else {
                out.push(line.clone());
            }
            state = RunState::Idle;
            continue;
        }

        let list_context = classify::in_list_context(lines, idx)
            || deletions.iter().any(|d| classify::bullet_prefix(d).is_some());
        if list_context {
            for deleted in deletions {
                let chip = state != RunState::ListRun;
                out.push(markers::wrap_list_line(deleted, true, chip));
                if chip && classify::bullet_prefix(deleted).is_some() {
                    state = RunState::ListRun;
                }
            }
            if changed {
                let chip = state != RunState::ListRun;
                out.push(markers::wrap_list_line(line, false, chip));
                if chip && classify::bullet_prefix(line).is_some() {
                    state = RunState::ListRun;
                }
            } else {
                out.push(line.clone());
                state = RunState::Idle;
            }
            continue;
        }

        if state != RunState::GenericRun {
            out.push(markers::GENERIC_BANNER.to_string());
        }
        for deleted in deletions {
            out.push(markers::wrap_line(deleted, true));
        }
        if changed {
            out.push(markers::wrap_line(line, false));
            state = RunState::GenericRun;
        } else {
            out.push(line.clone());
            state = RunState::Idle;
        }
    }

    flush_trailing_deletions(lines.len(), model, &mut out);

    out.push(String::new());
    out.push(markers::FOOTER.to_string());
    out
}

/// Deletions keyed past the end of the document get their own banner after
/// the main pass.
fn flush_trailing_deletions(line_count: usize, model: &DiffModel, out: &mut Vec<String>) {
    let trailing: Vec<&String> = model
        .deletions
        .range(line_count + 1..)
        .flat_map(|(_, dels)| dels.iter())
        .collect();
    if trailing.is_empty() {
        return;
    }
    if trailing.iter().any(|d| classify::is_image(d)) {
        out.push(markers::FIGURE_BANNER.to_string());
        for deleted in trailing {
            out.push(markers::figure_old(deleted));
        }
    } else {
        out.push(markers::GENERIC_BANNER.to_string());
        for deleted in trailing {
            if classify::is_table_row(deleted) && !classify::is_table_separator(deleted) {
                out.push(markers::wrap_table_row(deleted, true));
            } else {
                out.push(markers::wrap_line(deleted, true));
            }
        }
    }
}

fn region_changed(region: TableRegion, model: &DiffModel) -> bool {
    (region.start..=region.end)
        .any(|n| model.changed.contains(&n) || model.deletions.contains_key(&n))
}
