//! Configuration merging logic
//!
//! Priority: CLI args > ecstyle.toml > defaults

use crate::rules::{
    EolLastFallback, EolLastMode, EolLastOptions, LinebreakStyleFallback, LinebreakStyleMode,
    LinebreakStyleOptions, LintOptions,
};

use super::toml_schema::RulesSection;

/// Rule mode when neither CLI nor ecstyle.toml names one: enforce only what
/// `.editorconfig` declares.
const DEFAULT_EOL_LAST: EolLastOptions = EolLastOptions {
    mode: EolLastMode::Editorconfig,
    fallback: Some(EolLastFallback::Off),
};

const DEFAULT_LINEBREAK_STYLE: LinebreakStyleOptions = LinebreakStyleOptions {
    mode: LinebreakStyleMode::Editorconfig,
    fallback: Some(LinebreakStyleFallback::Off),
};

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliLintOptions {
    pub eol_last: Option<EolLastMode>,
    pub eol_last_fallback: Option<EolLastFallback>,
    pub linebreak_style: Option<LinebreakStyleMode>,
    pub linebreak_style_fallback: Option<LinebreakStyleFallback>,
}

/// Merge configurations from CLI, TOML, and defaults.
///
/// A mode given on the command line re-enables a rule disabled in TOML. The
/// default `off` fallback only comes with the default mode: a mode chosen
/// explicitly gets no fallback unless one is given too, so an undeclared
/// `.editorconfig` property is reported.
pub fn merge_lint_options(cli: &CliLintOptions, toml: Option<&RulesSection>) -> LintOptions {
    let eol_toml = toml.and_then(|t| t.eol_last.as_ref());
    let eol_enabled = cli.eol_last.is_some()
        || cli.eol_last_fallback.is_some()
        || eol_toml.and_then(|t| t.enabled).unwrap_or(true);
    let eol_last = eol_enabled.then(|| {
        let fallback = cli
            .eol_last_fallback
            .or_else(|| eol_toml.and_then(|t| t.fallback));
        match cli.eol_last.or_else(|| eol_toml.and_then(|t| t.mode)) {
            Some(mode) => EolLastOptions { mode, fallback },
            None => EolLastOptions {
                fallback: fallback.or(DEFAULT_EOL_LAST.fallback),
                ..DEFAULT_EOL_LAST
            },
        }
    });

    let lb_toml = toml.and_then(|t| t.linebreak_style.as_ref());
    let lb_enabled = cli.linebreak_style.is_some()
        || cli.linebreak_style_fallback.is_some()
        || lb_toml.and_then(|t| t.enabled).unwrap_or(true);
    let linebreak_style = lb_enabled.then(|| {
        let fallback = cli
            .linebreak_style_fallback
            .or_else(|| lb_toml.and_then(|t| t.fallback));
        match cli.linebreak_style.or_else(|| lb_toml.and_then(|t| t.mode)) {
            Some(mode) => LinebreakStyleOptions { mode, fallback },
            None => LinebreakStyleOptions {
                fallback: fallback.or(DEFAULT_LINEBREAK_STYLE.fallback),
                ..DEFAULT_LINEBREAK_STYLE
            },
        }
    });

    LintOptions {
        eol_last,
        linebreak_style,
    }
}
