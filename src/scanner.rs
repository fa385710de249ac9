//! Line terminator scanning.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Matches, Regex};

/// CRLF or a bare LF. A lone CR does not end a line.
pub(crate) static LINE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").unwrap());

/// One line terminator found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTerminator<'t> {
    /// Byte offset of the first terminator byte.
    pub offset: usize,
    /// Either `"\n"` or `"\r\n"`.
    pub text: &'t str,
}

impl LineTerminator<'_> {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

/// Lazily yields every line terminator of a text, left to right.
///
/// Scanning again means building a new scanner over the same text.
pub struct LineEndingScanner<'t> {
    matches: Matches<'static, 't>,
}

impl<'t> LineEndingScanner<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            matches: LINE_TERMINATOR.find_iter(text),
        }
    }
}

impl<'t> Iterator for LineEndingScanner<'t> {
    type Item = LineTerminator<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| LineTerminator {
            offset: m.start(),
            text: m.as_str(),
        })
    }
}
