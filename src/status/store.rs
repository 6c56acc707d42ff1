//! `StatusStore`: read-modify-write over `hq-status.json`.

use std::path::{Path, PathBuf};

use super::document::{StatusDocument, StatusUpdate};
use crate::errors::Result;
use crate::{storage, timestamp};

/// Handle on one status document.
#[derive(Debug, Clone)]
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document.  Missing or malformed files give all four
    /// projects at the empty sentence.
    pub fn read(&self) -> Result<StatusDocument> {
        let doc = match storage::read_document(&self.path)? {
            Some(value) => StatusDocument::from_value(&value),
            None => StatusDocument::default(),
        };
        Ok(doc)
    }

    /// Sanitize and store the listed sentences.  An empty update returns
    /// the current document without writing.
    pub fn write(&self, update: &StatusUpdate) -> Result<StatusDocument> {
        let mut doc = self.read()?;
        if update.is_empty() {
            return Ok(doc);
        }

        doc.apply(update, timestamp::now());
        storage::write_document(&self.path, &doc)?;

        tracing::debug!(path = %self.path.display(), "status written");
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Project;
    use tempfile::TempDir;

    #[test]
    fn empty_update_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let store = StatusStore::new(dir.path().join("hq-status.json"));

        let doc = store.write(&StatusUpdate::new()).unwrap();
        assert_eq!(doc, StatusDocument::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = StatusStore::new(dir.path().join("hq-status.json"));

        let written = store
            .write(&StatusUpdate::new().set(Project::Personal, "  moving   house "))
            .unwrap();
        assert_eq!(written.personal, "moving house");
        assert_eq!(store.read().unwrap(), written);
    }
}
