//! `SecretStore`: read-modify-write over `secrets.json`.

use std::path::{Path, PathBuf};

use super::document::{SecretDocument, SecretsUpdate};
use crate::errors::Result;
use crate::{redact, storage, timestamp};

/// Handle on one secrets document.  Holds only the path; every call
/// goes to disk.
#[derive(Debug, Clone)]
pub struct SecretStore {
    path: PathBuf,
}

impl SecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.
    ///
    /// A missing file gives the default document (epoch timestamp, no
    /// fields).  A malformed file keeps whatever fields still validate.
    pub fn read(&self) -> Result<SecretDocument> {
        let doc = match storage::read_document(&self.path)? {
            Some(value) => SecretDocument::from_value(&value),
            None => SecretDocument::default(),
        };
        Ok(doc)
    }

    /// Like [`read`](Self::read) but `None` when the file does not exist.
    pub fn read_existing(&self) -> Result<Option<SecretDocument>> {
        Ok(storage::read_document(&self.path)?.map(|value| SecretDocument::from_value(&value)))
    }

    /// Apply `update` and persist the result.
    ///
    /// Fields the update leaves as `Keep` retain their value and
    /// timestamp.  An update with no changes returns the current document
    /// without touching the file.
    pub fn write(&self, update: &SecretsUpdate) -> Result<SecretDocument> {
        let mut doc = self.read()?;
        if update.is_noop() {
            return Ok(doc);
        }

        doc.apply(update, timestamp::now());
        storage::write_document(&self.path, &doc)?;

        tracing::debug!(
            path = %self.path.display(),
            configured = doc.configured().len(),
            "secrets written"
        );
        Ok(doc)
    }

    /// Display-safe redaction of a secret value.
    pub fn mask(value: &str) -> String {
        redact::mask(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::SecretField;
    use tempfile::TempDir;

    fn store() -> (TempDir, SecretStore) {
        let dir = TempDir::new().expect("create temp dir");
        let store = SecretStore::new(dir.path().join("secrets.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_reads_default() {
        let (_dir, store) = store();
        let doc = store.read().unwrap();
        assert_eq!(doc, SecretDocument::default());
        assert!(store.read_existing().unwrap().is_none());
    }

    #[test]
    fn noop_update_does_not_create_file() {
        let (_dir, store) = store();
        store.write(&SecretsUpdate::new()).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let (_dir, store) = store();
        let written = store
            .write(&SecretsUpdate::new().set(SecretField::AppsheetRegion, "eu.appsheet.com"))
            .unwrap();

        assert_eq!(store.read().unwrap(), written);
        assert_eq!(store.read_existing().unwrap(), Some(written));
    }

    #[test]
    fn mask_matches_shared_redaction() {
        assert_eq!(SecretStore::mask("ab"), "••••••••");
        assert_eq!(SecretStore::mask("abcdefghij"), "abcd...ghij");
        assert_eq!(SecretStore::mask(""), "");
    }
}
