//! `.editorconfig` reading.
//!
//! Properties are resolved per directory: a section contributes when its
//! pattern accepts any file name inside the directory (`[*]`, `[**]`,
//! `[src/*]` for `src/`). Extension-specific sections such as `[*.md]`
//! never apply to a directory as a whole.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use tracing::debug;

use crate::policy::PolicyError;

const EDITORCONFIG_FILE: &str = ".editorconfig";

/// Stand-in file name used to ask whether a section covers every file of a
/// directory. Only wildcard-only final segments accept it.
const ANY_FILE_PROBE: &str = "*";

/// A single `.editorconfig` property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Bool(bool),
    Number(u32),
    /// The literal `unset`.
    Unset,
    /// Any other value, lowercased.
    Str(String),
}

impl PropertyValue {
    fn parse(raw: &str) -> Self {
        let value = raw.trim().to_lowercase();
        match value.as_str() {
            "true" => PropertyValue::Bool(true),
            "false" => PropertyValue::Bool(false),
            "unset" => PropertyValue::Unset,
            _ => value
                .parse::<u32>()
                .map(PropertyValue::Number)
                .unwrap_or(PropertyValue::Str(value)),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Number(n) => write!(f, "{n}"),
            PropertyValue::Unset => f.write_str("unset"),
            PropertyValue::Str(s) => f.write_str(s),
        }
    }
}

/// Merged `.editorconfig` properties for one directory.
pub type RawProperties = BTreeMap<String, PropertyValue>;

/// Source of `.editorconfig` properties and filesystem facts.
pub trait PropertyStore: Send + Sync {
    /// Properties applicable to files directly inside `dir`.
    fn properties(&self, dir: &Path) -> Result<RawProperties, PolicyError>;

    fn is_dir(&self, path: &Path) -> Result<bool, PolicyError> {
        fs::metadata(path)
            .map(|meta| meta.is_dir())
            .map_err(|e| PolicyError::io(path, e))
    }
}

/// Reads `.editorconfig` files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct EditorConfigStore;

impl EditorConfigStore {
    pub fn new() -> Self {
        Self
    }
}

impl PropertyStore for EditorConfigStore {
    fn properties(&self, dir: &Path) -> Result<RawProperties, PolicyError> {
        // Nearest file first; stop once a file declares `root = true`.
        let mut files = vec![];
        for ancestor in dir.ancestors() {
            let path = ancestor.join(EDITORCONFIG_FILE);
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(PolicyError::io(path, e)),
            };
            let file = parse_editorconfig(&path, &content)?;
            let is_root = file.root;
            files.push((ancestor.to_path_buf(), file));
            if is_root {
                break;
            }
        }

        let probe = dir.join(ANY_FILE_PROBE);
        let mut merged = RawProperties::new();
        for (config_dir, file) in files.iter().rev() {
            for section in &file.sections {
                if section_applies(&file.path, config_dir, &section.pattern, &probe)? {
                    for (key, value) in &section.properties {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
        }

        debug!(dir = %dir.display(), files = files.len(), "resolved editorconfig properties");
        Ok(merged)
    }
}

/// One parsed `.editorconfig` file.
#[derive(Debug)]
pub struct EditorConfigFile {
    pub path: PathBuf,
    pub root: bool,
    pub sections: Vec<Section>,
}

#[derive(Debug)]
pub struct Section {
    pub pattern: String,
    pub properties: Vec<(String, PropertyValue)>,
}

/// Parse the contents of a `.editorconfig` file.
pub fn parse_editorconfig(path: &Path, content: &str) -> Result<EditorConfigFile, PolicyError> {
    let mut file = EditorConfigFile {
        path: path.to_path_buf(),
        root: false,
        sections: vec![],
    };

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(pattern) = header.strip_suffix(']') else {
                return Err(PolicyError::Parse {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    message: "unterminated section header".into(),
                });
            };
            file.sections.push(Section {
                pattern: pattern.to_string(),
                properties: vec![],
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(PolicyError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("expected `key = value`, found `{line}`"),
            });
        };
        let key = key.trim().to_lowercase();
        let value = PropertyValue::parse(value);

        match file.sections.last_mut() {
            Some(section) => section.properties.push((key, value)),
            // Preamble: only `root` is meaningful
            None if key == "root" => file.root = value == PropertyValue::Bool(true),
            None => {}
        }
    }

    Ok(file)
}

fn section_applies(
    file: &Path,
    config_dir: &Path,
    pattern: &str,
    target: &Path,
) -> Result<bool, PolicyError> {
    let Ok(relative) = target.strip_prefix(config_dir) else {
        return Ok(false);
    };
    let relative = relative.to_string_lossy().replace('\\', "/");

    let glob = if pattern.contains('/') {
        pattern.trim_start_matches('/').to_string()
    } else if pattern.starts_with("**") {
        pattern.to_string()
    } else {
        format!("**/{pattern}")
    };

    let matcher = GlobBuilder::new(&glob)
        .literal_separator(true)
        .build()
        .map_err(|source| PolicyError::Glob {
            path: file.to_path_buf(),
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    Ok(matcher.is_match(relative.as_str()))
}
