//! Errors raised while resolving a rule's policy for a file.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::RuleName;

/// How a [`PolicyError`] is handled by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyErrorKind {
    /// No `.editorconfig` value and no fallback. Rules turn this into a
    /// single diagnostic at the start of the file.
    Incomplete,
    /// The `.editorconfig` contradicts itself. Aborts the file.
    Invalid,
    /// Filesystem or `.editorconfig` syntax failure. Aborts the file.
    Underlying,
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("{}", .rule.missing_config_message())]
    Incomplete { rule: RuleName },

    #[error(
        "indent_size is required but not set. Please set any number to indent_size in your .editorconfig."
    )]
    MissingIndentSize,

    #[error(
        "You cannot set indent_style = \"space\" and indent_size = \"{value}\" at the same time. Please set any number to indent_size in your .editorconfig."
    )]
    IncompatibleIndentSize { value: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{}: invalid section pattern `{pattern}`: {source}", .path.display())]
    Glob {
        path: PathBuf,
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

impl PolicyError {
    pub fn kind(&self) -> PolicyErrorKind {
        match self {
            PolicyError::Incomplete { .. } => PolicyErrorKind::Incomplete,
            PolicyError::MissingIndentSize | PolicyError::IncompatibleIndentSize { .. } => {
                PolicyErrorKind::Invalid
            }
            PolicyError::Io { .. } | PolicyError::Parse { .. } | PolicyError::Glob { .. } => {
                PolicyErrorKind::Underlying
            }
        }
    }

    pub fn is_incomplete(&self) -> bool {
        self.kind() == PolicyErrorKind::Incomplete
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PolicyError::Io {
            path: path.into(),
            source,
        }
    }
}
