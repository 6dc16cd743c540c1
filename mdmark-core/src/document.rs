//! Line-wise document handling and line-ending detection

/// Line-ending style detected from input text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the line-ending style of a text
    ///
    /// Any `\r\n` in the text selects CRLF; everything else, including text
    /// with no line breaks at all, is treated as LF.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Split text into lines, normalizing CRLF to LF first.
///
/// A single trailing newline does not produce a trailing empty line, so
/// `"a\n"` and `"a"` both split to one line.
pub fn split_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = normalized.split('\n').map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Join lines with the given ending, terminating the final line.
///
/// An empty line list produces an empty string, not a lone line break.
pub fn join_lines(lines: &[String], ending: LineEnding) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut out = lines.join(ending.as_str());
    out.push_str(ending.as_str());
    out
}
