//! `hq secrets` — show, set and clear the fixed API secrets.

use crate::cli::output;
use crate::cli::{read_secret_value, store_paths, Cli};
use crate::errors::Result;
use crate::secrets::{SecretField, SecretStore, SecretsUpdate};

/// Execute `secrets show`.
pub fn show(cli: &Cli) -> Result<()> {
    let store = SecretStore::new(store_paths(cli)?.secrets);
    let doc = store.read()?;

    output::info(&format!(
        "{} of {} secrets configured",
        doc.configured().len(),
        SecretField::ALL.len()
    ));
    output::print_secrets_table(&doc);

    Ok(())
}

/// Execute `secrets set`.
pub fn set(cli: &Cli, field: &str, value: Option<&str>) -> Result<()> {
    let field: SecretField = field.parse()?;
    let value = read_secret_value(field.as_str(), value)?;

    let store = SecretStore::new(store_paths(cli)?.secrets);
    let existed = store.read()?.is_set(field);
    store.write(&SecretsUpdate::new().set(field, value.as_str()))?;

    let verb = if existed { "updated" } else { "set" };
    output::success(&format!("Secret '{field}' {verb}"));
    output::tip("Run `hq creds import` to copy it into the credentials list.");

    Ok(())
}

/// Execute `secrets clear`.
pub fn clear(cli: &Cli, field: &str) -> Result<()> {
    let field: SecretField = field.parse()?;

    let store = SecretStore::new(store_paths(cli)?.secrets);
    let existed = store.read()?.is_set(field);
    store.write(&SecretsUpdate::new().clear(field))?;

    if existed {
        output::success(&format!("Secret '{field}' cleared"));
    } else {
        output::info(&format!("Secret '{field}' was not set"));
    }

    Ok(())
}
