//! Discovery of credentials already known elsewhere: the legacy secrets
//! document and a fixed allow-list of environment variables.

use super::item::{CredentialSource, NewCredential};
use crate::config::EnvSource;
use crate::errors::Result;
use crate::secrets::{SecretDocument, SecretField, SecretStore};

/// Read-only access to the legacy secrets document.
pub trait LegacySecrets {
    /// The legacy document, or `None` when there is none.
    fn read_legacy(&self) -> Result<Option<SecretDocument>>;
}

impl LegacySecrets for SecretStore {
    fn read_legacy(&self) -> Result<Option<SecretDocument>> {
        self.read_existing()
    }
}

/// Legacy fields imported, with the key and label each becomes.
pub const LEGACY_MAPPINGS: [(SecretField, &str, &str); 7] = [
    (SecretField::AppsheetAppId, "appsheet.app_id", "AppSheet App ID"),
    (SecretField::AppsheetCrmKey, "appsheet.crm_key", "AppSheet CRM Key"),
    (SecretField::AppsheetOpsKey, "appsheet.ops_key", "AppSheet Ops Key"),
    (SecretField::AppsheetKey, "appsheet.legacy_key", "AppSheet Legacy Key"),
    (SecretField::AppsheetRegion, "appsheet.region", "AppSheet Region"),
    (SecretField::N8nKey, "n8n.api_key", "n8n API Key"),
    (SecretField::GithubPat, "github.pat", "GitHub PAT"),
];

/// Environment variables scanned on import.
pub const ENV_CANDIDATES: [&str; 7] = [
    "MATON_API_KEY",
    "OPENAI_API_KEY",
    "GITHUB_TOKEN",
    "GH_TOKEN",
    "N8N_API_KEY",
    "GOOGLE_API_KEY",
    "ANTHROPIC_API_KEY",
];

/// Key under which an environment variable is stored, e.g.
/// `GH_TOKEN` -> `env.gh_token`.
pub fn env_key(name: &str) -> String {
    format!("env.{}", name.to_ascii_lowercase())
}

/// Collect every importable credential, in a fixed order: legacy fields
/// first, then environment variables.
///
/// Values are trimmed; empty or whitespace-only values are skipped.
pub fn discover(legacy: Option<&SecretDocument>, env: &impl EnvSource) -> Vec<NewCredential> {
    let mut found = Vec::new();

    let mut push = |key: String, label: &str, value: Option<&str>, source| {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return;
        };
        found.push(NewCredential::new(key, label, value, source));
    };

    if let Some(doc) = legacy {
        for (field, key, label) in LEGACY_MAPPINGS {
            push(
                key.to_string(),
                label,
                doc.get(field),
                CredentialSource::LegacySecrets,
            );
        }
    }

    for name in ENV_CANDIDATES {
        let value = env.var(name);
        push(env_key(name), name, value.as_deref(), CredentialSource::Env);
    }

    found
}
