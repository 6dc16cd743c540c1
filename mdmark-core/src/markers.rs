//! Marker vocabulary and synthesis
//!
//! The literal strings here are a wire format shared with the stripper and
//! with any other tool reading annotated documents; they must stay
//! byte-exact.

use crate::classify;

/// Standalone banner opening a generic change run; also used as the inline
/// chip on list items, where a banner line would break the list.
pub const GENERIC_BANNER: &str = "**[CHANGE]**";
/// Standalone banner emitted once per changed table region.
pub const TABLE_BANNER: &str = "**[CHANGE: table]**";
/// Standalone banner preceding a figure OLD/NEW block.
pub const FIGURE_BANNER: &str = "**[CHANGE: figure]**";

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";
pub const STRIKE_OPEN: &str = "<s>";
pub const STRIKE_CLOSE: &str = "</s>";

pub const OLD_PREFIX: &str = "OLD: ";
pub const NEW_PREFIX: &str = "NEW: ";
pub const LINE_BREAK: &str = "<br>";

/// Appended once per annotated document, preceded by a blank line.
pub const FOOTER: &str = "*Change markers were generated automatically from a document diff.*";

/// Wrap text in the addition wrapper.
pub fn wrap_added(text: &str) -> String {
    format!("{MARK_OPEN}{text}{MARK_CLOSE}")
}

/// Wrap text in the deletion wrapper: strike-through nested inside the
/// addition wrapper.
pub fn wrap_deleted(text: &str) -> String {
    format!("{MARK_OPEN}{STRIKE_OPEN}{text}{STRIKE_CLOSE}{MARK_CLOSE}")
}

fn wrap(text: &str, deleted: bool) -> String {
    if deleted {
        wrap_deleted(text)
    } else {
        wrap_added(text)
    }
}

/// Wrap a whole line, keeping heading and bullet syntax intact so the
/// wrapped output still renders as a heading or list item.
pub fn wrap_line(line: &str, deleted: bool) -> String {
    if let Some(h) = classify::heading(line) {
        if h.text.is_empty() {
            return line.to_string();
        }
        return format!("{}{} {}", h.indent, h.hashes, wrap(h.text, deleted));
    }
    if let Some(prefix_len) = classify::bullet_prefix(line) {
        let (prefix, body) = line.split_at(prefix_len);
        if body.is_empty() {
            return line.to_string();
        }
        return format!("{prefix}{}", wrap(body, deleted));
    }
    if line.trim().is_empty() {
        return line.to_string();
    }
    let indent_len = line.len() - line.trim_start().len();
    let (indent, body) = line.split_at(indent_len);
    format!("{indent}{}", wrap(body, deleted))
}

/// Render a changed list line. The chip goes on bullet lines only;
/// continuation lines under a bullet get the wrapped body alone.
pub fn wrap_list_line(line: &str, deleted: bool, chip: bool) -> String {
    if let Some(prefix_len) = classify::bullet_prefix(line) {
        let (prefix, body) = line.split_at(prefix_len);
        if body.is_empty() {
            return line.to_string();
        }
        if chip {
            return format!("{prefix}{GENERIC_BANNER} {}", wrap(body, deleted));
        }
        return format!("{prefix}{}", wrap(body, deleted));
    }
    wrap_line(line, deleted)
}

fn wrap_cell(cell: &str, deleted: bool) -> String {
    let core = cell.trim();
    if core.is_empty() {
        return cell.to_string();
    }
    let lead = &cell[..cell.len() - cell.trim_start().len()];
    let trail = &cell[cell.trim_end().len()..];
    format!("{lead}{}{trail}", wrap(core, deleted))
}

/// Wrap every non-empty cell of a table row, preserving the padding around
/// the pipes. Separator rows pass through untouched.
pub fn wrap_table_row(row: &str, deleted: bool) -> String {
    if classify::is_table_separator(row) {
        return row.to_string();
    }
    row.split('|')
        .map(|cell| wrap_cell(cell, deleted))
        .collect::<Vec<_>>()
        .join("|")
}

/// Wrap the cells of a changed table row. When the old row it replaced is
/// known and splits into the same number of cells, only the cells whose
/// trimmed content differs are wrapped; otherwise every non-empty cell is.
pub fn wrap_changed_table_row(row: &str, old_row: Option<&str>) -> String {
    if classify::is_table_separator(row) {
        return row.to_string();
    }
    let cells: Vec<&str> = row.split('|').collect();
    let old_cells: Vec<&str> = match old_row {
        Some(old) => old.split('|').collect(),
        None => Vec::new(),
    };
    let comparable = !old_cells.is_empty() && old_cells.len() == cells.len();
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            if comparable && old_cells[i].trim() == cell.trim() {
                cell.to_string()
            } else {
                wrap_cell(cell, false)
            }
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// The OLD block of a figure change: deletion-wrapped old image line with a
/// forced line break.
pub fn figure_old(line: &str) -> String {
    format!("{OLD_PREFIX}{}{LINE_BREAK}", wrap_deleted(line.trim()))
}

/// The NEW block of a figure change.
pub fn figure_new(line: &str) -> String {
    format!("{NEW_PREFIX}{}{LINE_BREAK}", wrap_added(line.trim()))
}
