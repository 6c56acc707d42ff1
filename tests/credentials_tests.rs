//! Integration tests for the credentials store and import.

use std::collections::HashMap;
use std::fs;

use kiwy_hq::credentials::{CredentialSource, CredentialStore, NewCredential};
use kiwy_hq::secrets::{SecretField, SecretStore, SecretsUpdate};
use tempfile::TempDir;

/// Helper: credentials and secrets stores side by side in a temp dir.
fn stores() -> (TempDir, CredentialStore, SecretStore) {
    let dir = TempDir::new().expect("create temp dir");
    let creds = CredentialStore::new(dir.path().join("credentials.json"));
    let secrets = SecretStore::new(dir.path().join("secrets.json"));
    (dir, creds, secrets)
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Upsert / clear
// ---------------------------------------------------------------------------

#[test]
fn upsert_same_key_keeps_one_item() {
    let (_dir, store, _) = stores();

    store
        .upsert(NewCredential::new(
            "github.pat",
            "GitHub PAT",
            "ghp_xyz",
            CredentialSource::Manual,
        ))
        .unwrap();
    let db = store
        .upsert(NewCredential::new(
            "github.pat",
            "GitHub PAT",
            "ghp_new",
            CredentialSource::Manual,
        ))
        .unwrap();

    let matching: Vec<_> = db.items.iter().filter(|i| i.key == "github.pat").collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].value, "ghp_new");
    assert_eq!(store.read().unwrap(), db);
}

#[test]
fn upsert_stamps_item_and_document() {
    let (_dir, store, _) = stores();
    let db = store
        .upsert(NewCredential::new("a", "A", "alpha-value", CredentialSource::Manual))
        .unwrap();

    assert_eq!(db.items[0].updated_at, db.updated_at);
}

#[test]
fn clear_removes_only_that_key() {
    let (_dir, store, _) = stores();
    store
        .upsert(NewCredential::new("a", "A", "1111111111", CredentialSource::Manual))
        .unwrap();
    store
        .upsert(NewCredential::new("b", "B", "2222222222", CredentialSource::Manual))
        .unwrap();

    let db = store.clear("a").unwrap();
    assert!(db.get("a").is_none());
    assert!(db.get("b").is_some());

    // Clearing again is a no-op, not an error.
    let again = store.clear("a").unwrap();
    assert_eq!(again.len(), 1);
}

#[test]
fn malformed_file_reads_empty() {
    let (_dir, store, _) = stores();
    fs::write(store.path(), r#"{ "items": "oops" }"#).unwrap();
    assert!(store.read().unwrap().is_empty());

    fs::write(store.path(), "[]").unwrap();
    assert!(store.read().unwrap().is_empty());
}

#[test]
fn odd_items_survive_unrelated_upsert() {
    let (_dir, store, _) = stores();
    fs::write(
        store.path(),
        r#"{
  "updatedAt": "2025-01-01T00:00:00.000Z",
  "items": [
    {
      "key": "github.pat",
      "label": "GitHub PAT",
      "value": "ghp_keepme_1234567890",
      "source": "manual",
      "updatedAt": 1700000000000
    },
    {
      "key": "old.tag",
      "label": "Old Tag",
      "value": "old-tag-value-123",
      "source": "imported",
      "updatedAt": "2025-01-01T00:00:00.000Z"
    }
  ]
}"#,
    )
    .unwrap();

    store
        .upsert(NewCredential::new("other", "Other", "other-value", CredentialSource::Manual))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let items = raw["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);

    let by_key = |key: &str| items.iter().find(|i| i["key"] == key).unwrap();
    assert_eq!(by_key("github.pat")["value"], "ghp_keepme_1234567890");
    assert_eq!(by_key("github.pat")["updatedAt"], "1970-01-01T00:00:00.000Z");
    assert_eq!(by_key("old.tag")["value"], "old-tag-value-123");
    assert_eq!(by_key("old.tag")["source"], "manual");
    assert_eq!(by_key("old.tag")["updatedAt"], "2025-01-01T00:00:00.000Z");
}

#[test]
fn persisted_shape_matches_document_format() {
    let (_dir, store, _) = stores();
    store
        .upsert(NewCredential::new(
            "n8n.api_key",
            "n8n API Key",
            "n8n-1234567890",
            CredentialSource::Env,
        ))
        .unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
    let item = &raw["items"][0];
    assert_eq!(item["key"], "n8n.api_key");
    assert_eq!(item["label"], "n8n API Key");
    assert_eq!(item["value"], "n8n-1234567890");
    assert_eq!(item["source"], "env");
    assert!(item["updatedAt"].is_string());
    assert!(raw["updatedAt"].is_string());
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[test]
fn import_pulls_legacy_secrets_and_env() {
    let (_dir, store, secrets) = stores();
    secrets
        .write(
            &SecretsUpdate::new()
                .set(SecretField::GithubPat, "ghp_legacy_1234567890")
                .set(SecretField::AppsheetAppId, "  app-42  ")
                .set(SecretField::N8nKey, "   "),
        )
        .unwrap();

    let db = store
        .import_known(&secrets, &env(&[("OPENAI_API_KEY", "sk-openai-abcdef")]))
        .unwrap();

    assert_eq!(db.len(), 3);
    let pat = db.get("github.pat").unwrap();
    assert_eq!(pat.source, CredentialSource::LegacySecrets);
    assert_eq!(pat.label, "GitHub PAT");
    assert_eq!(db.get("appsheet.app_id").unwrap().value, "app-42");
    assert!(db.get("n8n.api_key").is_none());

    let openai = db.get("env.openai_api_key").unwrap();
    assert_eq!(openai.source, CredentialSource::Env);
    assert_eq!(openai.label, "OPENAI_API_KEY");
}

#[test]
fn import_twice_does_not_duplicate() {
    let (_dir, store, secrets) = stores();
    secrets
        .write(&SecretsUpdate::new().set(SecretField::GithubPat, "ghp_legacy_1234567890"))
        .unwrap();
    let environment = env(&[
        ("GH_TOKEN", "ghp_env_token_value"),
        ("GOOGLE_API_KEY", "AIza-google"),
    ]);

    let first = store.import_known(&secrets, &environment).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = store.import_known(&secrets, &environment).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), first.len());
    assert!(second.updated_at > first.updated_at);

    let first_keys: Vec<&str> = first.items.iter().map(|i| i.key.as_str()).collect();
    let second_keys: Vec<&str> = second.items.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(first_keys, second_keys);
}

#[test]
fn import_overwrites_manual_entry_with_same_key() {
    let (_dir, store, secrets) = stores();
    store
        .upsert(NewCredential::new(
            "github.pat",
            "My PAT",
            "ghp_manual_value",
            CredentialSource::Manual,
        ))
        .unwrap();
    store
        .upsert(NewCredential::new(
            "custom.key",
            "Custom",
            "custom-value-123",
            CredentialSource::Manual,
        ))
        .unwrap();
    secrets
        .write(&SecretsUpdate::new().set(SecretField::GithubPat, "ghp_from_legacy"))
        .unwrap();

    let db = store.import_known(&secrets, &env(&[])).unwrap();

    assert_eq!(db.len(), 2);
    let pat = db.get("github.pat").unwrap();
    assert_eq!(pat.value, "ghp_from_legacy");
    assert_eq!(pat.source, CredentialSource::LegacySecrets);
    assert_eq!(db.get("custom.key").unwrap().source, CredentialSource::Manual);
}

#[test]
fn import_without_legacy_file_uses_env_only() {
    let (_dir, store, secrets) = stores();
    assert!(!secrets.path().exists());

    let db = store
        .import_known(&secrets, &env(&[("ANTHROPIC_API_KEY", "sk-ant-1234567890")]))
        .unwrap();

    assert_eq!(db.len(), 1);
    assert_eq!(db.items[0].key, "env.anthropic_api_key");
}

// ---------------------------------------------------------------------------
// Permissions and masking
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn credentials_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, store, _) = stores();
    store
        .upsert(NewCredential::new("k", "K", "value-value", CredentialSource::Manual))
        .unwrap();

    let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn mask_examples() {
    assert_eq!(CredentialStore::mask("ab"), "••••••••");
    assert_eq!(CredentialStore::mask("abcdefghij"), "abcd...ghij");
    assert_eq!(CredentialStore::mask(""), "");
}
