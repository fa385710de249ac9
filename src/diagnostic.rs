use std::fmt;
use std::ops::Range;

use crate::policy::RuleName;

/// A point in the source. Lines are 1-based, columns 0-based and counted
/// in characters. Line 0 addresses the file as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }
}

/// Replace the bytes in `range` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Fix {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    /// Insertion is a replacement of an empty range.
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::replace(offset..offset, text)
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self::replace(range, "")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    Missing,
    Unexpected,
    ExpectedLf,
    ExpectedCrlf,
    /// Neither `.editorconfig` nor a fallback gave the rule a value.
    Editorconfig,
}

impl MessageId {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageId::Missing => "missing",
            MessageId::Unexpected => "unexpected",
            MessageId::ExpectedLf => "expectedLF",
            MessageId::ExpectedCrlf => "expectedCRLF",
            MessageId::Editorconfig => "editorconfig",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: RuleName,
    pub message_id: MessageId,
    pub span: Span,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Reported once per file when the rule's policy cannot be determined.
    pub fn missing_config(rule: RuleName) -> Self {
        Self {
            rule,
            message_id: MessageId::Editorconfig,
            span: Span::point(Position::new(0, 0)),
            fix: None,
        }
    }

    pub fn message(&self) -> String {
        match self.message_id {
            MessageId::Missing => "Newline required at end of file but not found.".to_string(),
            MessageId::Unexpected => "Newline not allowed at end of file.".to_string(),
            MessageId::ExpectedLf => "Expected linebreaks to be 'LF' but found 'CRLF'.".to_string(),
            MessageId::ExpectedCrlf => {
                "Expected linebreaks to be 'CRLF' but found 'LF'.".to_string()
            }
            MessageId::Editorconfig => self.rule.missing_config_message(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}  {}  {}",
            self.span.start.line,
            self.span.start.column,
            self.message(),
            self.rule
        )
    }
}
