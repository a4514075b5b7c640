//! Persisted project configuration and the flag/config merge.
//!
//! `youtools.json` is written by `init` and read by `add`. Flags typed on the
//! command line win over the file; flag defaults never do.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::project::{Project, DEFAULT_OUTPUT_DIR};
use crate::utils::io;

/// The closed set of options shared by flags and the persisted config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    Typescript,
    Overwrite,
    AppendToIndex,
    Path,
    Silent,
}

impl OptionKey {
    pub const ALL: [OptionKey; 5] = [
        OptionKey::Typescript,
        OptionKey::Overwrite,
        OptionKey::AppendToIndex,
        OptionKey::Path,
        OptionKey::Silent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::Typescript => "typescript",
            OptionKey::Overwrite => "overwrite",
            OptionKey::AppendToIndex => "appendToIndex",
            OptionKey::Path => "path",
            OptionKey::Silent => "silent",
        }
    }
}

/// Option keys the user explicitly supplied in this invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    keys: BTreeSet<OptionKey>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: OptionKey) {
        self.keys.insert(key);
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<OptionKey> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = OptionKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Flag values after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFlags {
    pub typescript: bool,
    pub overwrite: bool,
    pub append_to_index: bool,
    pub path: Option<String>,
    pub silent: bool,
}

impl Default for CliFlags {
    fn default() -> Self {
        Self {
            typescript: true,
            overwrite: false,
            append_to_index: true,
            path: None,
            silent: false,
        }
    }
}

/// Contents of `youtools.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistedConfig {
    pub typescript: bool,
    pub overwrite: bool,
    pub append_to_index: bool,
    pub path: String,
    pub silent: bool,
}

impl PersistedConfig {
    pub fn from_flags(flags: &CliFlags) -> Self {
        Self {
            typescript: flags.typescript,
            overwrite: flags.overwrite,
            append_to_index: flags.append_to_index,
            path: flags
                .path
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            silent: flags.silent,
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("'path' must not be empty".to_string());
        }
        Ok(())
    }
}

/// Options every component of the add pipeline reads. Fully resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveOptions {
    pub use_native_language: bool,
    pub overwrite_existing: bool,
    pub append_to_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    pub silent: bool,
}

impl From<&CliFlags> for EffectiveOptions {
    fn from(flags: &CliFlags) -> Self {
        Self {
            use_native_language: flags.typescript,
            overwrite_existing: flags.overwrite,
            append_to_index: flags.append_to_index,
            output_directory: flags.path.as_ref().map(PathBuf::from),
            silent: flags.silent,
        }
    }
}

/// Combine flags with the persisted config. For each key the flag value is
/// used when the key is in `overrides`, the persisted value otherwise.
pub fn merge(
    flags: &CliFlags,
    overrides: OverrideSet,
    persisted: Option<&PersistedConfig>,
) -> EffectiveOptions {
    let Some(config) = persisted else {
        return EffectiveOptions::from(flags);
    };

    let explicit = |key: OptionKey| overrides.contains(key);

    EffectiveOptions {
        use_native_language: if explicit(OptionKey::Typescript) {
            flags.typescript
        } else {
            config.typescript
        },
        overwrite_existing: if explicit(OptionKey::Overwrite) {
            flags.overwrite
        } else {
            config.overwrite
        },
        append_to_index: if explicit(OptionKey::AppendToIndex) {
            flags.append_to_index
        } else {
            config.append_to_index
        },
        output_directory: match (&flags.path, explicit(OptionKey::Path)) {
            (Some(path), true) => Some(PathBuf::from(path)),
            _ => Some(PathBuf::from(&config.path)),
        },
        silent: if explicit(OptionKey::Silent) {
            flags.silent
        } else {
            config.silent
        },
    }
}

/// Read and validate the project's persisted config.
///
/// `Ok(None)` when no config file exists. A file that cannot be read or does
/// not match the schema yields `config.malformed` naming the file.
pub fn load(project: &Project) -> Result<Option<PersistedConfig>> {
    let path = project.config_path();
    if !path.exists() {
        return Ok(None);
    }
    let display = path.display().to_string();

    let raw = io::read_file(&path, "read config")
        .map_err(|e| Error::config_malformed(display.clone(), e.summary()))?;

    let config: PersistedConfig = serde_json::from_str(&raw)
        .map_err(|e| Error::config_malformed(display.clone(), e.to_string()))?;

    config
        .validate()
        .map_err(|problem| Error::config_malformed(display, problem))?;

    Ok(Some(config))
}

/// Parse a boolean flag value. Accepts the usual spellings, case-insensitive.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
