//! Text Segmenter: splits raw text into lines, keeping blank lines as explicit entries.

/// One input line. `raw` keeps original spacing; `trimmed` is what comparisons use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Original spacing, kept for renderers that want indentation back.
    /// Blocks are currently built from `trimmed` only.
    #[allow(dead_code)]
    pub raw: String,
    pub trimmed: String,
    pub is_empty: bool,
}

impl Line {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        Self {
            raw: raw.to_string(),
            trimmed: trimmed.to_string(),
            is_empty: trimmed.is_empty(),
        }
    }
}

/// Splits on `\n` or `\r\n`. Never fails; an empty input yields one empty line.
pub fn segment(raw_text: &str) -> Vec<Line> {
    raw_text
        .split('\n')
        .map(|l| Line::new(l.strip_suffix('\r').unwrap_or(l)))
        .collect()
}
