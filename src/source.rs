use crate::scanner::LINE_TERMINATOR;

/// Source text together with its lines.
///
/// Lines are split on the same terminators [`crate::scanner::LineEndingScanner`]
/// reports, so line `n` (1-based) is the text ended by the `n`th terminator.
pub struct SourceText<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: LINE_TERMINATOR.split(text).collect(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Never empty: an empty text has a single empty line.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Length in characters of the line at 0-based `index`.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, |line| line.chars().count())
    }
}
