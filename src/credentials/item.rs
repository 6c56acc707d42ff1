//! Credential items and the credentials document.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::timestamp;

/// How a credential entered HQ.  Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialSource {
    /// Copied from the secrets document by an import.
    LegacySecrets,
    /// Copied from an allow-listed environment variable by an import.
    Env,
    /// Entered by the operator.
    Manual,
}

impl CredentialSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CredentialSource::LegacySecrets => "legacy-secrets",
            CredentialSource::Env => "env",
            CredentialSource::Manual => "manual",
        }
    }

    /// Parse a stored tag.  `None` for tags this version does not know.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "legacy-secrets" => Some(CredentialSource::LegacySecrets),
            "env" => Some(CredentialSource::Env),
            "manual" => Some(CredentialSource::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored credential.  `value` is plaintext at rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialItem {
    pub key: String,
    pub label: String,
    pub value: String,
    pub source: CredentialSource,
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
}

impl CredentialItem {
    /// Validate one stored item.
    ///
    /// `key`, `label` and `value` must be strings.  An unknown or missing
    /// `source` reads as manual, and an unusable `updatedAt` as the epoch,
    /// so the item survives the next write.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let obj = raw.as_object()?;
        let text = |name: &str| obj.get(name).and_then(Value::as_str).map(str::to_owned);
        let key = text("key")?;

        let source = match obj.get("source").and_then(Value::as_str) {
            Some(tag) => CredentialSource::from_tag(tag).unwrap_or_else(|| {
                tracing::warn!(
                    key = %key,
                    source = tag,
                    "unknown credential source, reading as manual"
                );
                CredentialSource::Manual
            }),
            None => CredentialSource::Manual,
        };

        Some(Self {
            label: text("label")?,
            value: text("value")?,
            source,
            updated_at: timestamp::parse_or_epoch(obj.get("updatedAt").and_then(Value::as_str)),
            key,
        })
    }
}

/// A credential as submitted for upsert, before it is stamped.
///
/// The store assumes `key`, `label` and `value` were already validated as
/// non-empty by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub key: String,
    pub label: String,
    pub value: String,
    pub source: CredentialSource,
}

impl NewCredential {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        source: CredentialSource,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            source,
        }
    }

    pub(crate) fn stamp(self, now: DateTime<Utc>) -> CredentialItem {
        CredentialItem {
            key: self.key,
            label: self.label,
            value: self.value,
            source: self.source,
            updated_at: now,
        }
    }
}

/// Contents of `credentials.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDatabase {
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,
    pub items: Vec<CredentialItem>,
}

impl Default for CredentialDatabase {
    fn default() -> Self {
        Self {
            updated_at: timestamp::epoch(),
            items: Vec::new(),
        }
    }
}

impl CredentialDatabase {
    /// Build a database from parsed JSON.
    ///
    /// A root that is not an object, or has no `items` array, gives an
    /// empty database.  Items without a string key, label and value are
    /// skipped; see [`CredentialItem::from_value`].
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let Some(raw_items) = obj.get("items").and_then(Value::as_array) else {
            return Self::default();
        };

        let mut items = Vec::with_capacity(raw_items.len());
        for (idx, raw) in raw_items.iter().enumerate() {
            match CredentialItem::from_value(raw) {
                Some(item) => items.push(item),
                None => tracing::warn!(
                    index = idx,
                    "skipping credential without string key, label and value"
                ),
            }
        }

        Self {
            updated_at: timestamp::parse_or_epoch(obj.get("updatedAt").and_then(Value::as_str)),
            items,
        }
    }

    /// The item stored under `key`.
    pub fn get(&self, key: &str) -> Option<&CredentialItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order: by label, then key.
    pub fn sorted_by_label(&self) -> Vec<&CredentialItem> {
        let mut sorted: Vec<&CredentialItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| {
            a.label
                .to_lowercase()
                .cmp(&b.label.to_lowercase())
                .then_with(|| a.key.cmp(&b.key))
        });
        sorted
    }

    /// Replace the item with the same key in place, or append.
    pub(crate) fn upsert(&mut self, item: NewCredential, now: DateTime<Utc>) {
        let stamped = item.stamp(now);
        match self.items.iter_mut().find(|x| x.key == stamped.key) {
            Some(existing) => *existing = stamped,
            None => self.items.push(stamped),
        }
        self.updated_at = now;
    }

    /// Drop the item with `key`, if any.  Always stamps the document.
    pub(crate) fn remove(&mut self, key: &str, now: DateTime<Utc>) -> bool {
        let before = self.items.len();
        self.items.retain(|x| x.key != key);
        self.updated_at = now;
        self.items.len() != before
    }
}
