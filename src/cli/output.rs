//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{DateTime, Utc};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::credentials::{CredentialDatabase, CredentialStore};
use crate::secrets::{SecretDocument, SecretField};
use crate::status::{Project, StatusDocument};
use crate::timestamp;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Table cell for a timestamp; the epoch and `None` read as "never".
pub fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) if ts != timestamp::epoch() => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => "never".to_string(),
    }
}

/// Print the secrets table (Field, Name, State, Updated).  Values are never shown.
pub fn print_secrets_table(doc: &SecretDocument) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Name", "State", "Updated"]);

    for field in SecretField::ALL {
        let state = if doc.is_set(field) { "Set" } else { "Not set" };
        table.add_row(vec![
            field.as_str().to_string(),
            field.label().to_string(),
            state.to_string(),
            format_time(doc.field_updated_at(field)),
        ]);
    }

    println!("{table}");
}

/// Print credentials sorted by label, with masked values.
pub fn print_credentials_table(db: &CredentialDatabase) {
    if db.is_empty() {
        info("No credentials stored yet.");
        tip("Run `hq creds import` or `hq creds set <KEY> --label <LABEL>`.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Label", "Key", "Source", "Value", "Updated"]);

    for item in db.sorted_by_label() {
        table.add_row(vec![
            item.label.clone(),
            item.key.clone(),
            item.source.to_string(),
            CredentialStore::mask(&item.value),
            format_time(Some(item.updated_at)),
        ]);
    }

    println!("{table}");
}

/// Print one row per project.
pub fn print_status_table(doc: &StatusDocument) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Project", "Status", "Updated"]);

    for project in Project::ALL {
        table.add_row(vec![
            project.as_str().to_string(),
            doc.get(project).to_string(),
            format_time(doc.field_updated_at(project)),
        ]);
    }

    println!("{table}");
}
