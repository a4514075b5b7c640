//! Writing utilities into the consumer project.
//!
//! A utility lands at `<dir>/<name>.<ext>`. Existing files are only replaced
//! when overwriting is enabled. The index file re-exports each utility once.

use std::path::{Path, PathBuf};

use crate::config::EffectiveOptions;
use crate::error::{Error, Result};
use crate::output::{IndexStatus, MaterializationStatus};
use crate::transpile::OutputMode;
use crate::utils::io;

/// Where and in which form utilities are written for one run.
#[derive(Debug, Clone)]
pub struct Target {
    pub dir: PathBuf,
    pub mode: OutputMode,
}

impl Target {
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, self.mode.extension()))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(self.mode.index_file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materialized {
    pub output_path: PathBuf,
    pub status: MaterializationStatus,
    pub index: Option<IndexStatus>,
}

/// Write `text` for utility `name` and register it in the index.
///
/// The index is updated for skipped files too; the export line is only ever
/// added once, so re-running is harmless.
pub fn materialize(
    name: &str,
    text: &str,
    options: &EffectiveOptions,
    target: &Target,
) -> Result<Materialized> {
    io::ensure_dir(&target.dir)?;

    let output_path = target.output_path(name);
    let exists = output_path.exists();

    let status = if exists && !options.overwrite_existing {
        if !options.silent {
            log_status!("add", "Skipping {}, because overwrite is disabled", name);
        }
        MaterializationStatus::SkippedExisting
    } else {
        io::write_file_atomic(&output_path, text)?;
        if exists {
            if !options.silent {
                log_status!("add", "Overwrote {}", output_path.display());
            }
            MaterializationStatus::Overwritten
        } else {
            MaterializationStatus::Written
        }
    };

    let index = if options.append_to_index {
        Some(ensure_index_export(&target.index_path(), name)?)
    } else {
        None
    };

    Ok(Materialized {
        output_path,
        status,
        index,
    })
}

/// Re-export line for a utility.
pub fn export_line(name: &str) -> String {
    format!("export * from './{}';", name)
}

/// Append the export line for `name` unless the index already has it.
pub fn ensure_index_export(index_path: &Path, name: &str) -> Result<IndexStatus> {
    let current = io::read_file_or_empty(index_path, "read index")
        .map_err(|e| Error::write_failed(index_path.display().to_string(), e.summary()))?;

    let line = export_line(name);
    if current.lines().any(|existing| existing.trim() == line) {
        return Ok(IndexStatus::Present);
    }

    let mut chunk = String::new();
    if !current.is_empty() && !current.ends_with('\n') {
        chunk.push('\n');
    }
    chunk.push_str(&line);
    chunk.push('\n');

    io::append_file(index_path, &chunk)?;
    Ok(IndexStatus::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn options(overwrite: bool, append: bool) -> EffectiveOptions {
        EffectiveOptions {
            use_native_language: false,
            overwrite_existing: overwrite,
            append_to_index: append,
            output_directory: None,
            silent: true,
        }
    }

    fn target(dir: &Path) -> Target {
        Target {
            dir: dir.join("lib").join("utils"),
            mode: OutputMode::Transpiled,
        }
    }

    #[test]
    fn writes_new_file_and_creates_directory() {
        let dir = tempdir().unwrap();
        let target = target(dir.path());

        let out = materialize("debounce", "js", &options(false, false), &target).unwrap();

        assert_eq!(out.status, MaterializationStatus::Written);
        assert_eq!(out.output_path, target.dir.join("debounce.js"));
        assert_eq!(fs::read_to_string(&out.output_path).unwrap(), "js");
        assert_eq!(out.index, None);
        assert!(!target.index_path().exists());
    }

    #[test]
    fn existing_file_is_kept_without_overwrite() {
        let dir = tempdir().unwrap();
        let target = target(dir.path());

        materialize("debounce", "first", &options(false, true), &target).unwrap();
        let out = materialize("debounce", "second", &options(false, true), &target).unwrap();

        assert_eq!(out.status, MaterializationStatus::SkippedExisting);
        assert_eq!(fs::read_to_string(&out.output_path).unwrap(), "first");
        assert_eq!(out.index, Some(IndexStatus::Present));
    }

    #[test]
    fn existing_file_is_replaced_with_overwrite() {
        let dir = tempdir().unwrap();
        let target = target(dir.path());

        materialize("debounce", "first", &options(true, false), &target).unwrap();
        let out = materialize("debounce", "second", &options(true, false), &target).unwrap();

        assert_eq!(out.status, MaterializationStatus::Overwritten);
        assert_eq!(fs::read_to_string(&out.output_path).unwrap(), "second");
    }

    #[test]
    fn export_line_is_appended_exactly_once() {
        let dir = tempdir().unwrap();
        let index = dir.path().join("index.js");

        assert_eq!(ensure_index_export(&index, "debounce").unwrap(), IndexStatus::Appended);
        for _ in 0..4 {
            assert_eq!(ensure_index_export(&index, "debounce").unwrap(), IndexStatus::Present);
        }

        let content = fs::read_to_string(&index).unwrap();
        assert_eq!(content.matches("export * from './debounce';").count(), 1);
    }

    #[test]
    fn export_lines_keep_existing_content_and_newlines() {
        let dir = tempdir().unwrap();
        let index = dir.path().join("index.js");
        fs::write(&index, "export * from './capitalize';").unwrap();

        ensure_index_export(&index, "debounce").unwrap();

        assert_eq!(
            fs::read_to_string(&index).unwrap(),
            "export * from './capitalize';\nexport * from './debounce';\n"
        );
    }

    #[test]
    fn export_line_for_prefix_name_is_distinct() {
        let dir = tempdir().unwrap();
        let index = dir.path().join("index.js");

        ensure_index_export(&index, "debounce-leading").unwrap();
        assert_eq!(ensure_index_export(&index, "debounce").unwrap(), IndexStatus::Appended);
    }

    #[cfg(unix)]
    #[test]
    fn unwritable_directory_reports_write_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let target = target(dir.path());
        fs::create_dir_all(&target.dir).unwrap();
        fs::set_permissions(&target.dir, fs::Permissions::from_mode(0o555)).unwrap();

        let result = materialize("debounce", "js", &options(false, false), &target);
        fs::set_permissions(&target.dir, fs::Permissions::from_mode(0o755)).unwrap();

        // Running as root ignores directory permissions.
        if let Err(err) = result {
            assert_eq!(err.code.as_str(), "write.failed");
        }
    }
}
