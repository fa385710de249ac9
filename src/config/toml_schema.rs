//! TOML schema definitions for ecstyle.toml

use serde::{Deserialize, Serialize};

use crate::rules::{EolLastFallback, EolLastMode, LinebreakStyleFallback, LinebreakStyleMode};

/// Root structure for ecstyle.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcstyleToml {
    /// Per-rule settings
    #[serde(default)]
    pub rules: RulesSection,
}

/// `[rules]` section in ecstyle.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesSection {
    #[serde(rename = "eol-last")]
    pub eol_last: Option<EolLastSection>,

    #[serde(rename = "linebreak-style")]
    pub linebreak_style: Option<LinebreakStyleSection>,
}

/// `[rules.eol-last]`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EolLastSection {
    /// Run the rule at all (default: true)
    pub enabled: Option<bool>,
    pub mode: Option<EolLastMode>,
    pub fallback: Option<EolLastFallback>,
}

/// `[rules.linebreak-style]`
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinebreakStyleSection {
    /// Run the rule at all (default: true)
    pub enabled: Option<bool>,
    pub mode: Option<LinebreakStyleMode>,
    pub fallback: Option<LinebreakStyleFallback>,
}
