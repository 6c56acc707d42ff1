//! The fixed set of secret fields and the per-field update command.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::HqError;

/// One of the seven secrets HQ knows about.
///
/// Serializes as its camelCase document key (`githubPat`), which is also
/// how it appears in `fieldUpdatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SecretField {
    /// Legacy single AppSheet key.
    AppsheetKey,
    AppsheetCrmKey,
    AppsheetOpsKey,
    AppsheetAppId,
    /// e.g. `www.appsheet.com`, `eu.appsheet.com`.
    AppsheetRegion,
    N8nKey,
    GithubPat,
}

impl SecretField {
    /// Every field, in document order.
    pub const ALL: [SecretField; 7] = [
        SecretField::AppsheetKey,
        SecretField::AppsheetCrmKey,
        SecretField::AppsheetOpsKey,
        SecretField::AppsheetAppId,
        SecretField::AppsheetRegion,
        SecretField::N8nKey,
        SecretField::GithubPat,
    ];

    /// The key used in the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            SecretField::AppsheetKey => "appsheetKey",
            SecretField::AppsheetCrmKey => "appsheetCrmKey",
            SecretField::AppsheetOpsKey => "appsheetOpsKey",
            SecretField::AppsheetAppId => "appsheetAppId",
            SecretField::AppsheetRegion => "appsheetRegion",
            SecretField::N8nKey => "n8nKey",
            SecretField::GithubPat => "githubPat",
        }
    }

    /// Human-readable name for tables.
    pub fn label(self) -> &'static str {
        match self {
            SecretField::AppsheetKey => "AppSheet key (legacy)",
            SecretField::AppsheetCrmKey => "AppSheet CRM key",
            SecretField::AppsheetOpsKey => "AppSheet Ops key",
            SecretField::AppsheetAppId => "AppSheet app ID",
            SecretField::AppsheetRegion => "AppSheet region",
            SecretField::N8nKey => "n8n API key",
            SecretField::GithubPat => "GitHub PAT",
        }
    }

    /// Look up a field by its document key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for SecretField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the document key (`githubPat`) or kebab-case (`github-pat`).
impl FromStr for SecretField {
    type Err = HqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let squashed: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|f| f.as_str().to_ascii_lowercase() == squashed)
            .ok_or_else(|| HqError::UnknownField(s.to_string()))
    }
}

/// What a single write does to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Leave the value and its timestamp alone.
    #[default]
    Keep,
    /// Store this value and stamp the field.
    Set(String),
    /// Remove the value and stamp the field.
    Clear,
}
