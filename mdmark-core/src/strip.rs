//! Marker stripping, the inverse transform
//!
//! Removes every marker the annotation pass can emit and restores plain
//! markdown. Deletion-wrapped spans carry old-document text, so they are
//! removed wholesale rather than unwrapped.

use crate::classify;
use crate::document::{join_lines, split_lines, LineEnding};
use crate::markers;

/// Remove all change markers from a document.
///
/// Stripping is idempotent; content that was never annotated passes through
/// unchanged apart from trailing blank-line trimming.
pub fn strip(content: &str) -> String {
    let ending = LineEnding::detect(content);
    let lines = split_lines(content);
    let stripped = strip_lines(&lines);
    join_lines(&stripped, ending)
}

pub(crate) fn strip_lines(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];
        let trimmed = line.trim();

        if trimmed == markers::FOOTER || is_banner(trimmed) {
            idx += 1;
            // banners and the footer own at most one following blank line
            if lines.get(idx).is_some_and(|next| next.trim().is_empty()) {
                idx += 1;
            }
            continue;
        }

        // legacy generated-commentary section: dropped through end of document
        if is_summary_heading(line) {
            break;
        }

        if let Some(clean) = strip_inline(line) {
            out.push(clean);
        }
        idx += 1;
    }

    while out.last().is_some_and(|line| line.trim().is_empty()) {
        out.pop();
    }
    out
}

fn is_banner(trimmed: &str) -> bool {
    trimmed.starts_with(markers::TABLE_BANNER)
        || trimmed.starts_with(markers::FIGURE_BANNER)
        || trimmed == markers::GENERIC_BANNER
}

fn is_summary_heading(line: &str) -> bool {
    classify::heading(line).is_some_and(|h| h.text == "Summary of Changes")
}

/// Strip inline markers from one line; `None` drops the line entirely.
fn strip_inline(line: &str) -> Option<String> {
    let mut text = line.to_string();

    // inline list chips
    let chip_spaced = format!("{} ", markers::GENERIC_BANNER);
    text = text
        .replace(&chip_spaced, "")
        .replace(markers::GENERIC_BANNER, "");

    // addition wrapper tokens, leaving deletion spans exposed
    text = text
        .replace(markers::MARK_OPEN, "")
        .replace(markers::MARK_CLOSE, "");

    // deletion spans hold old-document text: remove them wholesale
    let mut had_deletion = false;
    while let Some(start) = text.find(markers::STRIKE_OPEN) {
        let Some(end_rel) = text[start..].find(markers::STRIKE_CLOSE) else {
            break;
        };
        let end = start + end_rel + markers::STRIKE_CLOSE.len();
        text.replace_range(start..end, "");
        had_deletion = true;
    }

    // figure scaffolding
    let unindented = text.trim_start();
    if unindented.starts_with(markers::OLD_PREFIX) || unindented.starts_with(markers::NEW_PREFIX) {
        let indent_len = text.len() - unindented.len();
        text = format!(
            "{}{}",
            &text[..indent_len],
            &unindented[markers::OLD_PREFIX.len()..]
        );
    }
    if let Some(without_break) = text.trim_end().strip_suffix(markers::LINE_BREAK) {
        text = without_break.trim_end().to_string();
    }

    // a line reduced to bare structure by deletion removal is gone entirely
    if had_deletion && is_structural_shell(&text) {
        return None;
    }
    Some(text)
}

/// True when a line holds only structural syntax and no content: the shells
/// left behind once deletion-wrapped text is removed.
fn is_structural_shell(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return true;
    }
    if let Some(h) = classify::heading(line) {
        return h.text.is_empty();
    }
    if let Some(prefix_len) = classify::bullet_prefix(line) {
        return line[prefix_len..].trim().is_empty();
    }
    if classify::is_table_row(line) && !classify::is_table_separator(line) {
        return line.split('|').all(|cell| cell.trim().is_empty());
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown_passes_through() {
        let text = "# Title\n\nHello world\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn test_footer_removed() {
        let text = format!("Hello\n\n{}\n", markers::FOOTER);
        assert_eq!(strip(&text), "Hello\n");
    }

    #[test]
    fn test_banner_lines_removed() {
        let text = "**[CHANGE]**\n<mark>Hello</mark>\n";
        assert_eq!(strip(text), "Hello\n");

        let text = "**[CHANGE: table]**\n| A | B |\n";
        assert_eq!(strip(text), "| A | B |\n");
    }

    #[test]
    fn test_banner_owns_one_following_blank() {
        let text = "**[CHANGE]**\n\n<mark>Hello</mark>\n";
        assert_eq!(strip(text), "Hello\n");
    }

    #[test]
    fn test_inline_addition_unwrapped() {
        assert_eq!(strip("before <mark>mid</mark> after\n"), "before mid after\n");
    }

    #[test]
    fn test_deleted_line_dropped() {
        let text = "keep\n<mark><s>gone</s></mark>\nkeep too\n";
        assert_eq!(strip(text), "keep\nkeep too\n");
    }

    #[test]
    fn test_deleted_heading_dropped() {
        let text = "## <mark><s>Old heading</s></mark>\nkeep\n";
        assert_eq!(strip(text), "keep\n");
    }

    #[test]
    fn test_deleted_bullet_dropped() {
        let text = "- **[CHANGE]** <mark><s>one</s></mark>\n- two\n";
        assert_eq!(strip(text), "- two\n");
    }

    #[test]
    fn test_deleted_table_row_dropped() {
        let text = "| <mark><s>A</s></mark> | <mark><s>1</s></mark> |\n| B | 2 |\n";
        assert_eq!(strip(text), "| B | 2 |\n");
    }

    #[test]
    fn test_chip_removed_from_bullet() {
        assert_eq!(
            strip("- **[CHANGE]** <mark>ONE</mark>\n"),
            "- ONE\n"
        );
    }

    #[test]
    fn test_figure_scaffolding_restored() {
        let text = "**[CHANGE: figure]**\nOLD: <mark><s>![a](old.png)</s></mark><br>\nNEW: <mark>![a](new.png)</mark><br>\n";
        assert_eq!(strip(text), "![a](new.png)\n");
    }

    #[test]
    fn test_summary_section_dropped_to_end() {
        let text = "body\n\n## Summary of Changes\n- everything changed\n";
        assert_eq!(strip(text), "body\n");
    }

    #[test]
    fn test_summary_title_must_match_exactly() {
        let text = "## Summary of Changes to the Plan\nkeep\n";
        assert_eq!(strip(text), text);
    }

    #[test]
    fn test_idempotent() {
        let annotated = "**[CHANGE]**\n<mark><s>old</s></mark>\n<mark>new</mark>\n\n*Change markers were generated automatically from a document diff.*\n";
        let once = strip(annotated);
        assert_eq!(strip(&once), once);
        assert_eq!(once, "new\n");
    }

    #[test]
    fn test_trailing_blank_lines_trimmed() {
        assert_eq!(strip("text\n\n\n"), "text\n");
    }

    #[test]
    fn test_crlf_preserved() {
        let text = "a\r\n<mark>b</mark>\r\n";
        assert_eq!(strip(text), "a\r\nb\r\n");
    }
}
