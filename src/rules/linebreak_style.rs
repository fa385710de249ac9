//! Enforce a single line terminator style.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{LintContext, Rule};
use crate::diagnostic::{Diagnostic, Fix, MessageId, Position, Span};
use crate::policy::{LineEnding, Policy, PolicyError, RuleName};
use crate::scanner::LineEndingScanner;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinebreakStyleMode {
    #[default]
    Unix,
    Windows,
    Editorconfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinebreakStyleFallback {
    Unix,
    Windows,
    Off,
}

impl From<LinebreakStyleFallback> for Policy<LineEnding> {
    fn from(fallback: LinebreakStyleFallback) -> Self {
        match fallback {
            LinebreakStyleFallback::Unix => Policy::Enforce(LineEnding::Unix),
            LinebreakStyleFallback::Windows => Policy::Enforce(LineEnding::Windows),
            LinebreakStyleFallback::Off => Policy::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinebreakStyleOptions {
    pub mode: LinebreakStyleMode,
    pub fallback: Option<LinebreakStyleFallback>,
}

pub struct LinebreakStyle {
    options: LinebreakStyleOptions,
}

impl LinebreakStyle {
    pub fn new(options: LinebreakStyleOptions) -> Self {
        Self { options }
    }

    fn resolve(&self, ctx: &mut LintContext<'_>) -> Result<Option<LineEnding>, PolicyError> {
        match self.options.mode {
            LinebreakStyleMode::Unix => Ok(Some(LineEnding::Unix)),
            LinebreakStyleMode::Windows => Ok(Some(LineEnding::Windows)),
            LinebreakStyleMode::Editorconfig => {
                let fallback = self.options.fallback.map(Policy::<LineEnding>::from);
                Ok(match ctx.editorconfig_policy(fallback)? {
                    Some(Policy::Enforce(style)) => Some(style),
                    Some(Policy::Off) | None => None,
                })
            }
        }
    }
}

impl Rule for LinebreakStyle {
    fn name(&self) -> RuleName {
        RuleName::LinebreakStyle
    }

    fn check(&self, ctx: &mut LintContext<'_>) -> Result<(), PolicyError> {
        // No terminators to check, and no reason to look up configuration
        if ctx.source.text().is_empty() {
            return Ok(());
        }

        let Some(style) = self.resolve(ctx)? else {
            return Ok(());
        };

        let expected = style.terminator();
        let message_id = match style {
            LineEnding::Unix => MessageId::ExpectedLf,
            LineEnding::Windows => MessageId::ExpectedCrlf,
        };

        let source = ctx.source;
        for (idx, terminator) in LineEndingScanner::new(source.text()).enumerate() {
            if terminator.text == expected {
                continue;
            }

            // The nth terminator ends line n
            let line = idx + 1;
            ctx.report(Diagnostic {
                rule: RuleName::LinebreakStyle,
                message_id,
                span: Span {
                    start: Position::new(line, source.line_len(idx)),
                    end: Position::new(line + 1, 0),
                },
                fix: Some(Fix::replace(terminator.range(), expected)),
            });
        }

        Ok(())
    }
}
