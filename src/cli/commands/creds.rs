//! `hq creds` — list, upsert, clear and import named credentials.

use crate::cli::output;
use crate::cli::{
    read_secret_value, store_paths, validate_credential_key, validate_credential_label, Cli,
};
use crate::config::ProcessEnv;
use crate::credentials::{CredentialSource, CredentialStore, NewCredential};
use crate::errors::Result;
use crate::secrets::SecretStore;

/// Execute `creds list`.
pub fn list(cli: &Cli) -> Result<()> {
    let store = CredentialStore::new(store_paths(cli)?.credentials);
    let db = store.read()?;

    output::info(&format!("{} credential(s)", db.len()));
    output::print_credentials_table(&db);

    Ok(())
}

/// Execute `creds set`.
pub fn set(cli: &Cli, key: &str, label: &str, value: Option<&str>) -> Result<()> {
    validate_credential_key(key)?;
    validate_credential_label(label)?;
    let value = read_secret_value(key, value)?;

    let store = CredentialStore::new(store_paths(cli)?.credentials);
    let existed = store.read()?.get(key).is_some();
    let db = store.upsert(NewCredential::new(
        key,
        label.trim(),
        value.trim(),
        CredentialSource::Manual,
    ))?;

    let verb = if existed { "updated" } else { "added" };
    output::success(&format!(
        "Credential '{key}' {verb} ({} total)",
        db.len()
    ));

    Ok(())
}

/// Execute `creds clear`.
pub fn clear(cli: &Cli, key: &str) -> Result<()> {
    let store = CredentialStore::new(store_paths(cli)?.credentials);
    let existed = store.read()?.get(key).is_some();
    let db = store.clear(key)?;

    if existed {
        output::success(&format!("Credential '{key}' removed ({} left)", db.len()));
    } else {
        output::info(&format!("Credential '{key}' was not stored"));
    }

    Ok(())
}

/// Execute `creds import`.
pub fn import(cli: &Cli) -> Result<()> {
    let paths = store_paths(cli)?;
    let legacy = SecretStore::new(paths.secrets);
    let store = CredentialStore::new(paths.credentials);

    let before = store.read()?.len();
    let db = store.import_known(&legacy, &ProcessEnv)?;

    output::success(&format!(
        "Import finished: {} credential(s), {} new",
        db.len(),
        db.len().saturating_sub(before)
    ));

    Ok(())
}
