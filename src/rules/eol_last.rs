//! Require or disallow a newline at the end of files.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{LintContext, Rule};
use crate::diagnostic::{Diagnostic, Fix, MessageId, Position, Span};
use crate::policy::{FinalNewline, Policy, PolicyError, RuleName};

/// Every line terminator at the very end of the text.
static FINAL_EOLS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\r?\n)+\z").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EolLastMode {
    #[default]
    Always,
    Never,
    Editorconfig,
    /// Legacy alias of `always`.
    Unix,
    /// Legacy alias of `always` whose fix appends CRLF.
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EolLastFallback {
    Always,
    Never,
    Off,
}

impl From<EolLastFallback> for Policy<FinalNewline> {
    fn from(fallback: EolLastFallback) -> Self {
        match fallback {
            EolLastFallback::Always => Policy::Enforce(FinalNewline::Always),
            EolLastFallback::Never => Policy::Enforce(FinalNewline::Never),
            EolLastFallback::Off => Policy::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EolLastOptions {
    pub mode: EolLastMode,
    pub fallback: Option<EolLastFallback>,
}

/// The decision taken for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    Always { terminator: &'static str },
    Never,
}

pub struct EolLast {
    options: EolLastOptions,
}

impl EolLast {
    pub fn new(options: EolLastOptions) -> Self {
        Self { options }
    }

    /// `None` when the rule is off for this file or its policy is unknown.
    fn resolve(&self, ctx: &mut LintContext<'_>) -> Result<Option<Check>, PolicyError> {
        let check = match self.options.mode {
            EolLastMode::Always | EolLastMode::Unix => Check::Always { terminator: "\n" },
            EolLastMode::Windows => Check::Always {
                terminator: "\r\n",
            },
            EolLastMode::Never => Check::Never,
            EolLastMode::Editorconfig => {
                let fallback = self.options.fallback.map(Policy::<FinalNewline>::from);
                match ctx.editorconfig_policy(fallback)? {
                    Some(Policy::Enforce(FinalNewline::Always)) => {
                        Check::Always { terminator: "\n" }
                    }
                    Some(Policy::Enforce(FinalNewline::Never)) => Check::Never,
                    Some(Policy::Off) | None => return Ok(None),
                }
            }
        };
        Ok(Some(check))
    }
}

impl Rule for EolLast {
    fn name(&self) -> RuleName {
        RuleName::EolLast
    }

    fn check(&self, ctx: &mut LintContext<'_>) -> Result<(), PolicyError> {
        let source = ctx.source;
        let src = source.text();

        // Nothing to terminate, and no reason to look up configuration
        if src.is_empty() {
            return Ok(());
        }

        let Some(check) = self.resolve(ctx)? else {
            return Ok(());
        };

        let lines = source.lines();
        let ends_with_newline = src.ends_with('\n');

        match check {
            Check::Always { terminator } if !ends_with_newline => {
                let at = Position::new(lines.len(), source.line_len(lines.len() - 1));
                ctx.report(Diagnostic {
                    rule: RuleName::EolLast,
                    message_id: MessageId::Missing,
                    span: Span::point(at),
                    fix: Some(Fix::insert(src.len(), terminator)),
                });
            }
            Check::Never if ends_with_newline => {
                // At least two lines: the text ends with a terminator
                let start = Position::new(lines.len() - 1, source.line_len(lines.len() - 2));
                let end = Position::new(lines.len(), 0);
                let fix = FINAL_EOLS
                    .find(src)
                    .map(|eols| Fix::delete(eols.start()..src.len()));
                ctx.report(Diagnostic {
                    rule: RuleName::EolLast,
                    message_id: MessageId::Unexpected,
                    span: Span { start, end },
                    fix,
                });
            }
            _ => {}
        }

        Ok(())
    }
}
