//! `CredentialStore`: read-modify-write over `credentials.json`.

use std::path::{Path, PathBuf};

use super::import::{self, LegacySecrets};
use super::item::{CredentialDatabase, NewCredential};
use crate::config::EnvSource;
use crate::errors::Result;
use crate::{redact, storage, timestamp};

/// Handle on one credentials document.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the database.  Missing or malformed files give an empty one.
    pub fn read(&self) -> Result<CredentialDatabase> {
        let db = match storage::read_document(&self.path)? {
            Some(value) => CredentialDatabase::from_value(&value),
            None => CredentialDatabase::default(),
        };
        Ok(db)
    }

    /// Insert `item`, replacing any existing item with the same key.
    pub fn upsert(&self, item: NewCredential) -> Result<CredentialDatabase> {
        let mut db = self.read()?;
        let key = item.key.clone();
        db.upsert(item, timestamp::now());
        self.persist(&db)?;

        tracing::debug!(key = %key, items = db.len(), "credential upserted");
        Ok(db)
    }

    /// Remove the item with `key`.  Not an error if it does not exist.
    pub fn clear(&self, key: &str) -> Result<CredentialDatabase> {
        let mut db = self.read()?;
        let removed = db.remove(key, timestamp::now());
        self.persist(&db)?;

        tracing::debug!(key = %key, removed, items = db.len(), "credential cleared");
        Ok(db)
    }

    /// Upsert everything [`import::discover`] finds in `legacy` and `env`.
    ///
    /// Idempotent apart from timestamps: items are matched by key, so a
    /// second run never duplicates.  Nothing is written when nothing is
    /// discovered.
    pub fn import_known(
        &self,
        legacy: &impl LegacySecrets,
        env: &impl EnvSource,
    ) -> Result<CredentialDatabase> {
        let legacy_doc = legacy.read_legacy()?;
        let discovered = import::discover(legacy_doc.as_ref(), env);

        let mut db = self.read()?;
        if discovered.is_empty() {
            return Ok(db);
        }

        let count = discovered.len();
        let now = timestamp::now();
        for item in discovered {
            db.upsert(item, now);
        }
        self.persist(&db)?;

        tracing::debug!(imported = count, items = db.len(), "credentials imported");
        Ok(db)
    }

    /// Display-safe redaction of a credential value.
    pub fn mask(value: &str) -> String {
        redact::mask(value)
    }

    fn persist(&self, db: &CredentialDatabase) -> Result<()> {
        storage::write_document(&self.path, db)
    }
}
