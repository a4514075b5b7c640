//! The consumer project youtools operates on.
//!
//! A project is a directory (normally the current working directory) that
//! holds `youtools.json`, optionally a `tsconfig.json`, and the output
//! directory utilities are materialized into.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Persisted configuration file name, relative to the project root.
pub const CONFIG_FILE: &str = "youtools.json";

/// Marker file whose presence allows native (TypeScript) output.
pub const TYPESCRIPT_MARKER: &str = "tsconfig.json";

/// Output directory used when no path is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "lib/utils";

#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current() -> Result<Self> {
        let root = std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })?;
        Ok(Self::new(root))
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Whether the project carries the TypeScript marker file.
    pub fn has_typescript_marker(&self) -> bool {
        self.root.join(TYPESCRIPT_MARKER).is_file()
    }

    pub fn default_output_dir(&self) -> PathBuf {
        self.root.join(DEFAULT_OUTPUT_DIR)
    }

    /// Resolve a user-supplied output path: `~` and `$VAR` are expanded,
    /// relative paths are taken from the project root.
    pub fn resolve_path(&self, raw: &str) -> PathBuf {
        let expanded = shellexpand::full(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(raw).into_owned());
        let path = PathBuf::from(expanded);
        if path.is_absolute() {
            path
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn typescript_marker_detected_only_when_present() {
        let dir = tempdir().unwrap();
        let project = Project::new(dir.path());
        assert!(!project.has_typescript_marker());

        std::fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        assert!(project.has_typescript_marker());
    }

    #[test]
    fn relative_paths_resolve_against_root() {
        let project = Project::new("/work/app");
        assert_eq!(
            project.resolve_path("src/helpers"),
            PathBuf::from("/work/app/src/helpers")
        );
        assert_eq!(project.resolve_path("/abs/out"), PathBuf::from("/abs/out"));
        assert_eq!(project.default_output_dir(), PathBuf::from("/work/app/lib/utils"));
    }
}
