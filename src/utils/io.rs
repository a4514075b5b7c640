//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Read file contents with standardized error handling.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Read file contents, treating a missing file as empty.
pub fn read_file_or_empty(path: &Path, operation: &str) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(Error::internal_io(e.to_string(), Some(operation.to_string()))),
    }
}

/// Create a directory and its parents if missing.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::write_failed(dir.display().to_string(), e.to_string()))
}

/// Write content to file atomically.
///
/// The content goes to a uniquely named temp file in the target's directory
/// which is then renamed over the target. Readers see either the old content
/// or the new content, never a partial write. The temp file is removed if any
/// step fails.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let target = path.display().to_string();

    let parent = match path.parent() {
        Some(dir) if dir.as_os_str().is_empty() => Path::new("."),
        Some(dir) => dir,
        None => return Err(Error::write_failed(target, "path has no parent directory")),
    };

    let mut tmp = NamedTempFile::new_in(parent)
        .map_err(|e| Error::write_failed(target.clone(), e.to_string()))?;

    tmp.write_all(content.as_bytes())
        .map_err(|e| Error::write_failed(target.clone(), e.to_string()))?;

    tmp.persist(path)
        .map_err(|e| Error::write_failed(target, e.error.to_string()))?;

    Ok(())
}

/// Append content to a file, creating it if absent.
pub fn append_file(path: &Path, content: &str) -> Result<()> {
    let target = path.display().to_string();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::write_failed(target.clone(), e.to_string()))?;

    file.write_all(content.as_bytes())
        .map_err(|e| Error::write_failed(target, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn read_file_or_empty_handles_missing_file() {
        let dir = tempdir().unwrap();
        let content = read_file_or_empty(&dir.path().join("index.js"), "read index").unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn write_file_atomic_replaces_content_without_leftovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debounce.js");

        write_file_atomic(&path, "first").unwrap();
        write_file_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("debounce.js")]);
    }

    #[test]
    fn write_file_atomic_leaves_existing_tmp_sibling_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debounce.js");
        let sibling = dir.path().join("debounce.js.tmp");
        fs::write(&sibling, "user data").unwrap();

        write_file_atomic(&path, "export {}").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "export {}");
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "user data");
    }

    #[test]
    fn write_file_atomic_returns_write_failed_with_path() {
        let err = write_file_atomic(Path::new("/nonexistent/dir/file.txt"), "content").unwrap_err();
        assert_eq!(err.code.as_str(), "write.failed");
        assert_eq!(err.details["path"], "/nonexistent/dir/file.txt");
    }

    #[test]
    fn append_file_creates_then_appends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.js");

        append_file(&path, "a\n").unwrap();
        append_file(&path, "b\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
