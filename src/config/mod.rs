//! Configuration for ecstyle.
//!
//! This module provides:
//! - `.editorconfig` reading, per directory
//! - Loading tool configuration from `ecstyle.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod editorconfig;
mod file;
mod init;
mod merge;
mod toml_schema;

pub use editorconfig::{
    parse_editorconfig, EditorConfigFile, EditorConfigStore, PropertyStore, PropertyValue,
    RawProperties, Section,
};
pub use file::{find_config_file, find_file_upward, load_config, ConfigError, CONFIG_FILE_NAME};
pub use init::{generate_init_file, generate_init_file_in, ECSTYLE_TOML_TEMPLATE};
pub use merge::{merge_lint_options, CliLintOptions};
pub use toml_schema::{EcstyleToml, EolLastSection, LinebreakStyleSection, RulesSection};
