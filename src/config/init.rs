//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::CONFIG_FILE_NAME;

/// Template ecstyle.toml with documentation
pub const ECSTYLE_TOML_TEMPLATE: &str = r#"# ecstyle.toml - Configuration for ecstyle
#
# ecstyle checks and fixes two whitespace policies:
# - eol-last:        whether files end with a newline
# - linebreak-style: whether lines end with LF or CRLF
#
# With mode = "editorconfig" the policy is read from .editorconfig
# (insert_final_newline / end_of_line). `fallback` applies when the
# property is not set there; fallback = "off" skips the check instead.
# Leaving fallback out reports files whose .editorconfig is silent.

[rules.eol-last]
# enabled = true
# always | never | editorconfig | unix | windows
# ("unix" and "windows" behave like "always"; "windows" inserts CRLF)
mode = "editorconfig"
# always | never | off
fallback = "off"

[rules.linebreak-style]
# enabled = true
# unix | windows | editorconfig
mode = "editorconfig"
# unix | windows | off
fallback = "off"
"#;

/// Generate ecstyle.toml in the specified directory (or current directory if None).
///
/// Returns an error if ecstyle.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(
        || PathBuf::from(CONFIG_FILE_NAME),
        |d| d.join(CONFIG_FILE_NAME),
    );

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{CONFIG_FILE_NAME} already exists"),
        ));
    }

    fs::write(&path, ECSTYLE_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate ecstyle.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
