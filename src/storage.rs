//! JSON document persistence shared by every HQ store.
//!
//! Each store owns exactly one JSON document.  Writes replace the whole
//! file:
//!
//! 1. Serialize the document (pretty-printed, trailing newline).
//! 2. Write it to a hidden temp sibling (`.<name>.tmp`) created with `0600`.
//! 3. Rename the temp file over the target.
//! 4. Re-apply `0600` to the target.
//!
//! The rename is the only step that changes the visible document, so a
//! failed write leaves the previous document untouched.  A stale temp file
//! may be left behind; readers never look at it.
//!
//! Permission hardening is best-effort: a filesystem that rejects
//! permission bits logs a warning and the write still succeeds.
//!
//! # Known race
//!
//! Store operations are read-modify-write with no locking.  Two writers
//! racing on the same path can interleave, and the last rename wins: the
//! other writer's update is lost.  HQ has a single interactive operator, so
//! this is accepted rather than guarded against.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::errors::{HqError, Result};

/// Permission bits for every HQ document: owner read/write only.
pub const DOCUMENT_MODE: u32 = 0o600;

/// Read and parse a document.
///
/// - `Ok(None)` when the file does not exist
/// - `Ok(Some(Value::Null))` when the file exists but is not valid JSON
///   (callers treat that like any other wrongly-shaped document)
/// - `Err` for every other I/O failure
pub fn read_document(path: &Path) -> Result<Option<Value>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "document not found, using defaults");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "document is not valid JSON, ignoring contents"
            );
            Ok(Some(Value::Null))
        }
    }
}

/// Serialize `document` and atomically replace the file at `path`.
pub fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let mut buf = serde_json::to_vec_pretty(document)
        .map_err(|e| HqError::Serialization(format!("{}: {e}", path.display())))?;
    buf.push(b'\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path);
    {
        let mut file = create_restricted(&tmp_path)?;
        harden_permissions(&tmp_path);
        file.write_all(&buf)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    harden_permissions(path);

    tracing::debug!(path = %path.display(), bytes = buf.len(), "document written");
    Ok(())
}

/// Temp sibling used while writing `path`.
///
/// Lives in the same directory so the rename stays on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

/// Create (or truncate) a file that starts life with `0600` on Unix.
fn create_restricted(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(DOCUMENT_MODE);
    }

    options.open(path)
}

/// Best-effort `chmod 600`.  Failures are logged and swallowed.
fn harden_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(DOCUMENT_MODE);
        if let Err(e) = fs::set_permissions(path, perms) {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "could not restrict document permissions"
            );
        }
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let doc = read_document(&tmp.path().join("nope.json")).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn invalid_json_reads_as_null() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(read_document(&path).unwrap(), Some(Value::Null));
    }

    #[test]
    fn write_is_pretty_with_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        write_document(&path, &json!({ "a": 1 })).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn write_creates_parent_dirs_and_removes_temp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("data").join("doc.json");
        write_document(&path, &json!({ "ok": true })).unwrap();

        assert!(path.exists());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_replaces_whole_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        let long = json!({ "first": "a much longer value than the next one" });
        write_document(&path, &long).unwrap();
        write_document(&path, &json!({ "second": 2 })).unwrap();

        let doc = read_document(&path).unwrap().unwrap();
        assert_eq!(doc, json!({ "second": 2 }));
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let path = Path::new("/srv/hq/data/secrets.json");
        assert_eq!(temp_path(path), Path::new("/srv/hq/data/.secrets.json.tmp"));
    }

    #[cfg(unix)]
    #[test]
    fn written_document_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_document(&path, &json!({})).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn failed_write_leaves_previous_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        write_document(&path, &json!({ "v": 1 })).unwrap();

        // A directory squatting on the temp name cannot be opened for writing.
        fs::create_dir(temp_path(&path)).unwrap();

        assert!(write_document(&path, &json!({ "v": 2 })).is_err());
        let doc = read_document(&path).unwrap().unwrap();
        assert_eq!(doc, json!({ "v": 1 }));
    }
}
