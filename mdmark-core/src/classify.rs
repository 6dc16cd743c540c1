//! Structural line classification
//!
//! Pure predicates over single lines, plus a bounded backward scan for list
//! context and a single forward scan for table regions. No shared state.

/// A decomposed ATX heading: indentation, hash run, and the trailing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading<'a> {
    pub indent: &'a str,
    pub hashes: &'a str,
    pub text: &'a str,
}

/// Parse an ATX heading: 0-3 leading spaces, 1-6 hashes, then whitespace or
/// end of line.
pub fn heading(line: &str) -> Option<Heading<'_>> {
    let indent_len = line.len() - line.trim_start_matches(' ').len();
    if indent_len > 3 {
        return None;
    }
    let rest = &line[indent_len..];
    let hash_count = rest.chars().take_while(|&c| c == '#').count();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }
    let after = &rest[hash_count..];
    if !after.is_empty() && !after.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    Some(Heading {
        indent: &line[..indent_len],
        hashes: &rest[..hash_count],
        text: after.trim(),
    })
}

/// Length of a bullet or ordered-list prefix, including the whitespace that
/// follows the marker. `None` when the line is not a list item.
pub fn bullet_prefix(line: &str) -> Option<usize> {
    let indent_len = line.len() - line.trim_start().len();
    let rest = &line[indent_len..];
    let marker_len = if rest.starts_with(['-', '*', '+']) {
        1
    } else {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 || !rest[digits..].starts_with(['.', ')']) {
            return None;
        }
        digits + 1
    };
    let after = &rest[marker_len..];
    let space_len = after.len() - after.trim_start().len();
    if space_len == 0 {
        return None;
    }
    Some(indent_len + marker_len + space_len)
}

/// Bounded backward scan for list context.
///
/// A bullet line is trivially in list context. A non-bullet line is in list
/// context when one of the previous 6 lines is a bullet, with no blank line
/// or heading in between.
pub fn in_list_context(lines: &[String], idx: usize) -> bool {
    if bullet_prefix(&lines[idx]).is_some() {
        return true;
    }
    for back in 1..=6 {
        let Some(i) = idx.checked_sub(back) else {
            break;
        };
        let line = &lines[i];
        if line.trim().is_empty() || heading(line).is_some() {
            break;
        }
        if bullet_prefix(line).is_some() {
            return true;
        }
    }
    false
}

/// An image (figure) line: `![alt](target)` with nothing else on the line.
pub fn is_image(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.starts_with("![") {
        return false;
    }
    let Some(close) = trimmed.find("](") else {
        return false;
    };
    trimmed[close + 2..].ends_with(')')
}

/// Table row: the trimmed line contains at least one pipe.
pub fn is_table_row(line: &str) -> bool {
    line.trim().contains('|')
}

/// Header separator row: pipe-delimited segments of colons and dashes only.
pub fn is_table_separator(line: &str) -> bool {
    let trimmed = line.trim();
    if !trimmed.contains('|') || !trimmed.contains('-') {
        return false;
    }
    trimmed
        .split('|')
        .all(|seg| seg.trim().chars().all(|c| c == ':' || c == '-'))
}

/// Maximal contiguous span of table rows (1-indexed, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRegion {
    pub start: usize,
    pub end: usize,
}

/// Single forward scan over the document for table regions.
///
/// A region opens on the first table row after a non-table line and closes on
/// the first non-table line or end of document.
pub fn table_regions(lines: &[String]) -> Vec<TableRegion> {
    let mut regions = Vec::new();
    let mut open: Option<usize> = None;
    for (idx, line) in lines.iter().enumerate() {
        let n = idx + 1;
        if is_table_row(line) {
            if open.is_none() {
                open = Some(n);
            }
        } else if let Some(start) = open.take() {
            regions.push(TableRegion { start, end: n - 1 });
        }
    }
    if let Some(start) = open {
        regions.push(TableRegion {
            start,
            end: lines.len(),
        });
    }
    regions
}

/// The region containing 1-indexed line `n`, if any.
pub fn region_at(regions: &[TableRegion], n: usize) -> Option<TableRegion> {
    regions
        .iter()
        .copied()
        .find(|region| region.start <= n && n <= region.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_heading_levels() {
        for level in 1..=6 {
            let line = format!("{} Title", "#".repeat(level));
            let h = heading(&line).expect("should parse heading");
            assert_eq!(h.hashes.len(), level);
            assert_eq!(h.text, "Title");
        }
    }

    #[test]
    fn test_heading_indent() {
        let h = heading("   ## Indented").unwrap();
        assert_eq!(h.indent, "   ");
        assert_eq!(h.hashes, "##");
        assert_eq!(h.text, "Indented");

        // 4 spaces is an indented code block, not a heading
        assert!(heading("    # Not a heading").is_none());
    }

    #[test]
    fn test_heading_rejects() {
        assert!(heading("####### Seven").is_none());
        assert!(heading("#hashtag").is_none());
        assert!(heading("plain text").is_none());
    }

    #[test]
    fn test_heading_empty_text() {
        let h = heading("##").unwrap();
        assert_eq!(h.text, "");
    }

    #[test]
    fn test_bullet_prefix_variants() {
        assert_eq!(bullet_prefix("- one"), Some(2));
        assert_eq!(bullet_prefix("* one"), Some(2));
        assert_eq!(bullet_prefix("+ one"), Some(2));
        assert_eq!(bullet_prefix("  - nested"), Some(4));
        assert_eq!(bullet_prefix("1. first"), Some(3));
        assert_eq!(bullet_prefix("12) twelfth"), Some(4));
    }

    #[test]
    fn test_bullet_prefix_rejects() {
        assert!(bullet_prefix("-no space").is_none());
        assert!(bullet_prefix("1.no space").is_none());
        assert!(bullet_prefix("-").is_none());
        assert!(bullet_prefix("plain").is_none());
        assert!(bullet_prefix(". dot").is_none());
    }

    #[test]
    fn test_list_context_direct_and_continuation() {
        let lines = own(&["- item", "  wrapped continuation", "more prose"]);
        assert!(in_list_context(&lines, 0));
        assert!(in_list_context(&lines, 1));
        assert!(in_list_context(&lines, 2));
    }

    #[test]
    fn test_list_context_stops_at_blank() {
        let lines = own(&["- item", "", "paragraph"]);
        assert!(!in_list_context(&lines, 2));
    }

    #[test]
    fn test_list_context_stops_at_heading() {
        let lines = own(&["- item", "# Section", "paragraph"]);
        assert!(!in_list_context(&lines, 2));
    }

    #[test]
    fn test_list_context_bounded_at_six() {
        let mut lines = vec!["- item".to_string()];
        for i in 0..7 {
            lines.push(format!("continuation {i}"));
        }
        assert!(in_list_context(&lines, 6));
        assert!(!in_list_context(&lines, 7));
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("![alt](img.png)"));
        assert!(is_image("  ![alt text](path/to/img.png)  "));
        assert!(!is_image("text ![alt](img.png)"));
        assert!(!is_image("[link](page.md)"));
        assert!(!is_image("![unclosed](img.png extra"));
    }

    #[test]
    fn test_table_row_and_separator() {
        assert!(is_table_row("| A | B |"));
        assert!(is_table_row("a | b"));
        assert!(!is_table_row("plain"));

        assert!(is_table_separator("|---|---|"));
        assert!(is_table_separator("| :-- | --: |"));
        assert!(is_table_separator("---|---"));
        assert!(!is_table_separator("| A | B |"));
        assert!(!is_table_separator("| - A | B |"));
        assert!(!is_table_separator("plain"));
    }

    #[test]
    fn test_table_regions() {
        let lines = own(&["prose", "| A | B |", "|---|---|", "| 1 | 2 |", "", "| X |"]);
        let regions = table_regions(&lines);
        assert_eq!(
            regions,
            vec![
                TableRegion { start: 2, end: 4 },
                TableRegion { start: 6, end: 6 }
            ]
        );
    }

    #[test]
    fn test_region_at() {
        let regions = vec![TableRegion { start: 2, end: 4 }];
        assert_eq!(region_at(&regions, 1), None);
        assert_eq!(region_at(&regions, 3), Some(TableRegion { start: 2, end: 4 }));
        assert_eq!(region_at(&regions, 5), None);
    }

    #[test]
    fn test_region_runs_to_end_of_document() {
        let lines = own(&["prose", "| A |"]);
        let regions = table_regions(&lines);
        assert_eq!(regions, vec![TableRegion { start: 2, end: 2 }]);
    }
}
