//! The secrets document and the update applied to it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::field::{FieldUpdate, SecretField};
use crate::timestamp;

/// Contents of `secrets.json`.
///
/// A field that is `None` is "not configured".  `field_updated_at` records
/// when each field was last set or cleared and never holds values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDocument {
    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,

    #[serde(serialize_with = "timestamp::serialize_map")]
    pub field_updated_at: BTreeMap<SecretField, DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub appsheet_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appsheet_crm_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appsheet_ops_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appsheet_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appsheet_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n8n_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_pat: Option<String>,
}

impl Default for SecretDocument {
    fn default() -> Self {
        Self {
            updated_at: timestamp::epoch(),
            field_updated_at: BTreeMap::new(),
            appsheet_key: None,
            appsheet_crm_key: None,
            appsheet_ops_key: None,
            appsheet_app_id: None,
            appsheet_region: None,
            n8n_key: None,
            github_pat: None,
        }
    }
}

impl SecretDocument {
    /// Build a document from parsed JSON, keeping only what validates.
    ///
    /// Known fields holding strings are copied; anything else (unknown
    /// keys, numbers, nested objects, a non-object root) is dropped.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let mut doc = Self {
            updated_at: timestamp::parse_or_epoch(obj.get("updatedAt").and_then(Value::as_str)),
            ..Self::default()
        };

        for field in SecretField::ALL {
            if let Some(v) = obj.get(field.as_str()).and_then(Value::as_str) {
                *doc.slot_mut(field) = Some(v.to_string());
            }
        }

        if let Some(stamps) = obj.get("fieldUpdatedAt").and_then(Value::as_object) {
            for (key, raw) in stamps {
                let field = SecretField::from_key(key);
                let ts = raw.as_str().and_then(timestamp::parse);
                if let (Some(field), Some(ts)) = (field, ts) {
                    doc.field_updated_at.insert(field, ts);
                }
            }
        }

        doc
    }

    /// The stored value of `field`, if configured.
    pub fn get(&self, field: SecretField) -> Option<&str> {
        match field {
            SecretField::AppsheetKey => self.appsheet_key.as_deref(),
            SecretField::AppsheetCrmKey => self.appsheet_crm_key.as_deref(),
            SecretField::AppsheetOpsKey => self.appsheet_ops_key.as_deref(),
            SecretField::AppsheetAppId => self.appsheet_app_id.as_deref(),
            SecretField::AppsheetRegion => self.appsheet_region.as_deref(),
            SecretField::N8nKey => self.n8n_key.as_deref(),
            SecretField::GithubPat => self.github_pat.as_deref(),
        }
    }

    /// Whether `field` holds a value.
    pub fn is_set(&self, field: SecretField) -> bool {
        self.get(field).is_some()
    }

    /// When `field` was last set or cleared.
    pub fn field_updated_at(&self, field: SecretField) -> Option<DateTime<Utc>> {
        self.field_updated_at.get(&field).copied()
    }

    /// Names of configured fields, in document order.
    pub fn configured(&self) -> Vec<SecretField> {
        SecretField::ALL
            .into_iter()
            .filter(|f| self.is_set(*f))
            .collect()
    }

    fn slot_mut(&mut self, field: SecretField) -> &mut Option<String> {
        match field {
            SecretField::AppsheetKey => &mut self.appsheet_key,
            SecretField::AppsheetCrmKey => &mut self.appsheet_crm_key,
            SecretField::AppsheetOpsKey => &mut self.appsheet_ops_key,
            SecretField::AppsheetAppId => &mut self.appsheet_app_id,
            SecretField::AppsheetRegion => &mut self.appsheet_region,
            SecretField::N8nKey => &mut self.n8n_key,
            SecretField::GithubPat => &mut self.github_pat,
        }
    }

    /// Apply `update` at time `now`.  Returns `true` if any field changed.
    pub(crate) fn apply(&mut self, update: &SecretsUpdate, now: DateTime<Utc>) -> bool {
        let mut touched = false;

        for (field, change) in &update.fields {
            match change {
                FieldUpdate::Keep => continue,
                FieldUpdate::Set(value) => *self.slot_mut(*field) = Some(value.clone()),
                FieldUpdate::Clear => *self.slot_mut(*field) = None,
            }
            self.field_updated_at.insert(*field, now);
            touched = true;
        }

        if touched {
            self.updated_at = now;
        }
        touched
    }
}

/// A partial update: one [`FieldUpdate`] per field, `Keep` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretsUpdate {
    fields: BTreeMap<SecretField, FieldUpdate>,
}

impl SecretsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`.
    pub fn set(mut self, field: SecretField, value: impl Into<String>) -> Self {
        self.fields.insert(field, FieldUpdate::Set(value.into()));
        self
    }

    /// Remove `field` from the document.
    pub fn clear(mut self, field: SecretField) -> Self {
        self.fields.insert(field, FieldUpdate::Clear);
        self
    }

    /// Record an explicit change for `field`.
    pub fn with(mut self, field: SecretField, change: FieldUpdate) -> Self {
        self.fields.insert(field, change);
        self
    }

    /// `true` when every field is `Keep`.
    pub fn is_noop(&self) -> bool {
        self.fields.values().all(|c| *c == FieldUpdate::Keep)
    }
}
