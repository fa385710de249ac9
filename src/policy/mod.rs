//! Per-file style policy derived from `.editorconfig`.
//!
//! `.editorconfig` properties are translated once per directory into a
//! [`RuleConfig`], cached by [`ConfigCache`] and handed to rules through
//! [`ConfigResolver`].

mod cache;
mod error;
mod resolver;

pub use cache::ConfigCache;
pub use error::{PolicyError, PolicyErrorKind};
pub use resolver::ConfigResolver;

use std::fmt;

use crate::config::{PropertyValue, RawProperties};

/// Rules whose options can be read from `.editorconfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
    EolLast,
    Indent,
    JsxIndentProps,
    LinebreakStyle,
    NoTrailingSpaces,
}

impl RuleName {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleName::EolLast => "eol-last",
            RuleName::Indent => "indent",
            RuleName::JsxIndentProps => "jsx-indent-props",
            RuleName::LinebreakStyle => "linebreak-style",
            RuleName::NoTrailingSpaces => "no-trailing-spaces",
        }
    }

    /// `.editorconfig` properties the rule is derived from.
    pub fn editorconfig_properties(self) -> &'static [&'static str] {
        match self {
            RuleName::EolLast => &["insert_final_newline"],
            RuleName::Indent | RuleName::JsxIndentProps => &["indent_style", "indent_size"],
            RuleName::LinebreakStyle => &["end_of_line"],
            RuleName::NoTrailingSpaces => &["trim_trailing_whitespace"],
        }
    }

    /// Message reported when neither `.editorconfig` nor a fallback gives a value.
    pub fn missing_config_message(self) -> String {
        let properties = self.editorconfig_properties().join("` and `");
        format!(
            "`{properties}` is not set in .editorconfig and `fallback` option is not given either. Set one of them."
        )
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalNewline {
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Unix,
    Windows,
}

impl LineEnding {
    /// The terminator this style expects.
    pub fn terminator(self) -> &'static str {
        match self {
            LineEnding::Unix => "\n",
            LineEnding::Windows => "\r\n",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentWidth {
    Spaces(u32),
    Tab,
}

/// `trim_trailing_whitespace = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimTrailingWhitespace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsxIndentProps(pub IndentWidth);

/// Rule values derived from one directory's `.editorconfig` properties.
///
/// A `None` field means the properties do not declare a policy for that rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub eol_last: Option<FinalNewline>,
    pub indent: Option<IndentWidth>,
    pub linebreak_style: Option<LineEnding>,
    pub no_trailing_spaces: bool,
}

impl RuleConfig {
    /// Translate raw `.editorconfig` properties into rule values.
    ///
    /// Fails when `indent_style = space` comes without a usable `indent_size`.
    pub fn from_properties(props: &RawProperties) -> Result<Self, PolicyError> {
        let eol_last = match props.get("insert_final_newline") {
            Some(PropertyValue::Bool(true)) => Some(FinalNewline::Always),
            Some(PropertyValue::Bool(false)) => Some(FinalNewline::Never),
            _ => None,
        };

        let indent = match props.get("indent_style") {
            Some(PropertyValue::Str(style)) if style == "space" => {
                match props.get("indent_size") {
                    Some(PropertyValue::Number(size)) if *size > 0 => {
                        Some(IndentWidth::Spaces(*size))
                    }
                    None => return Err(PolicyError::MissingIndentSize),
                    Some(other) => {
                        return Err(PolicyError::IncompatibleIndentSize {
                            value: other.to_string(),
                        })
                    }
                }
            }
            Some(PropertyValue::Str(style)) if style == "tab" => Some(IndentWidth::Tab),
            _ => None,
        };

        let linebreak_style = match props.get("end_of_line") {
            Some(PropertyValue::Str(eol)) if eol == "lf" => Some(LineEnding::Unix),
            Some(PropertyValue::Str(eol)) if eol == "crlf" => Some(LineEnding::Windows),
            _ => None,
        };

        let no_trailing_spaces = matches!(
            props.get("trim_trailing_whitespace"),
            Some(PropertyValue::Bool(true))
        );

        Ok(RuleConfig {
            eol_last,
            indent,
            linebreak_style,
            no_trailing_spaces,
        })
    }
}

impl fmt::Display for RuleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(eol_last) = self.eol_last {
            let value = match eol_last {
                FinalNewline::Always => "always",
                FinalNewline::Never => "never",
            };
            writeln!(f, "{} = \"{value}\"", RuleName::EolLast)?;
        }
        if let Some(indent) = self.indent {
            for rule in [RuleName::Indent, RuleName::JsxIndentProps] {
                match indent {
                    IndentWidth::Spaces(size) => writeln!(f, "{rule} = {size}")?,
                    IndentWidth::Tab => writeln!(f, "{rule} = \"tab\"")?,
                }
            }
        }
        if let Some(linebreak_style) = self.linebreak_style {
            let value = match linebreak_style {
                LineEnding::Unix => "unix",
                LineEnding::Windows => "windows",
            };
            writeln!(f, "{} = \"{value}\"", RuleName::LinebreakStyle)?;
        }
        if self.no_trailing_spaces {
            writeln!(f, "{} = true", RuleName::NoTrailingSpaces)?;
        }
        Ok(())
    }
}

/// Effective policy for one rule at one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy<T> {
    Enforce(T),
    /// Skip the check entirely.
    Off,
}

/// A rule value that can be looked up in a [`RuleConfig`].
pub trait RuleSetting: Sized + Copy + fmt::Debug {
    const RULE: RuleName;

    fn from_config(config: &RuleConfig) -> Option<Self>;
}

impl RuleSetting for FinalNewline {
    const RULE: RuleName = RuleName::EolLast;

    fn from_config(config: &RuleConfig) -> Option<Self> {
        config.eol_last
    }
}

impl RuleSetting for LineEnding {
    const RULE: RuleName = RuleName::LinebreakStyle;

    fn from_config(config: &RuleConfig) -> Option<Self> {
        config.linebreak_style
    }
}

impl RuleSetting for IndentWidth {
    const RULE: RuleName = RuleName::Indent;

    fn from_config(config: &RuleConfig) -> Option<Self> {
        config.indent
    }
}

impl RuleSetting for JsxIndentProps {
    const RULE: RuleName = RuleName::JsxIndentProps;

    fn from_config(config: &RuleConfig) -> Option<Self> {
        config.indent.map(JsxIndentProps)
    }
}

impl RuleSetting for TrimTrailingWhitespace {
    const RULE: RuleName = RuleName::NoTrailingSpaces;

    fn from_config(config: &RuleConfig) -> Option<Self> {
        config.no_trailing_spaces.then_some(TrimTrailingWhitespace)
    }
}
