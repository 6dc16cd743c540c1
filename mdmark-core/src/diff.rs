//! Line-diff acquisition
//!
//! The engine only needs "two text blobs in, zero-context unified diff out";
//! this trait keeps it independent of where that diff comes from.

use anyhow::Result;
use similar::TextDiff;

/// Source of unified-diff text for a pair of documents.
pub trait DiffSource {
    /// Produce unified-diff text with zero context lines: `@@ -a[,b] +c[,d] @@`
    /// hunk headers followed by `+`/`-` lines only.
    fn unified_diff(&self, old: &str, new: &str) -> Result<String>;
}

/// In-process line diff backed by the `similar` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarDiff;

impl DiffSource for SimilarDiff {
    fn unified_diff(&self, old: &str, new: &str) -> Result<String> {
        let diff = TextDiff::from_lines(old, new);
        Ok(diff
            .unified_diff()
            .context_radius(0)
            .header("old", "new")
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts_produce_no_hunks() {
        let diff = SimilarDiff.unified_diff("a\nb\n", "a\nb\n").unwrap();
        assert!(!diff.contains("@@"));
    }

    #[test]
    fn test_zero_context() {
        let diff = SimilarDiff
            .unified_diff("a\nb\nc\n", "a\nB\nc\n")
            .unwrap();
        // surrounding unchanged lines must not appear as context
        assert!(!diff.contains(" a"));
        assert!(!diff.contains(" c"));
        assert!(diff.contains("-b"));
        assert!(diff.contains("+B"));
    }

    #[test]
    fn test_hunk_header_present() {
        let diff = SimilarDiff.unified_diff("a\n", "b\n").unwrap();
        assert!(diff.lines().any(|l| l.starts_with("@@ -")));
    }
}
