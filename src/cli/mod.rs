//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::{ProcessEnv, Settings, StorePaths};
use crate::errors::{HqError, Result};

/// Longest credential key accepted from the command line.
const MAX_KEY_LEN: usize = 128;

/// HQ CLI: secrets, credentials and project status for the personal dashboard.
#[derive(Parser)]
#[command(
    name = "hq",
    about = "Personal HQ dashboard: secrets, credentials and project status",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root holding .kiwy-hq.toml (default: current directory)
    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Data directory, relative to the project root (overrides .kiwy-hq.toml)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Manage the fixed set of API secrets
    Secrets {
        #[command(subcommand)]
        action: SecretsAction,
    },

    /// Manage named credentials
    Creds {
        #[command(subcommand)]
        action: CredsAction,
    },

    /// Show or update project status sentences
    Status {
        #[command(subcommand)]
        action: StatusAction,
    },
}

/// Secrets subcommands.
#[derive(clap::Subcommand)]
pub enum SecretsAction {
    /// Show which secrets are configured (never their values)
    Show,

    /// Set a secret
    Set {
        /// Field name (e.g. github-pat, appsheetAppId)
        field: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Clear a secret
    Clear {
        /// Field name
        field: String,
    },
}

/// Credential subcommands.
#[derive(clap::Subcommand)]
pub enum CredsAction {
    /// List credentials with masked values
    List,

    /// Add or update a credential
    Set {
        /// Credential key (e.g. github.pat)
        key: String,
        /// Display label
        #[arg(short, long)]
        label: String,
        /// Credential value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Remove a credential
    Clear {
        /// Credential key
        key: String,
    },

    /// Import credentials from legacy secrets and known environment variables
    Import,
}

/// Status subcommands.
#[derive(clap::Subcommand)]
pub enum StatusAction {
    /// Show all project sentences
    Show,

    /// Set the sentence for one project
    Set {
        /// Project: qualiver, echo, kuenti or personal
        project: String,
        /// The status sentence
        #[arg(trailing_var_arg = true, required = true)]
        sentence: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the document paths from CLI flags, `.kiwy-hq.toml` and the
/// `KIWY_HQ_*_PATH` environment overrides.
pub fn store_paths(cli: &Cli) -> Result<StorePaths> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let mut settings = Settings::load(&project_dir)?;
    if let Some(dir) = &cli.data_dir {
        settings.data_dir = dir.clone();
    }

    Ok(settings.store_paths(&project_dir, &ProcessEnv))
}

/// Get a secret value, trying in order:
/// 1. The value given on the command line (warns about shell history)
/// 2. Piped stdin
/// 3. A hidden interactive prompt
///
/// Empty values are rejected.
pub fn read_secret_value(name: &str, value: Option<&str>) -> Result<Zeroizing<String>> {
    let secret = if let Some(v) = value {
        output::warning("Value provided on command line — it may appear in shell history.");
        Zeroizing::new(v.to_string())
    } else if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        let entered = dialoguer::Password::new()
            .with_prompt(format!("Enter value for {name}"))
            .interact()
            .map_err(|e| HqError::CommandFailed(format!("input prompt: {e}")))?;
        Zeroizing::new(entered)
    };

    if secret.trim().is_empty() {
        return Err(HqError::CommandFailed(format!(
            "value for {name} cannot be empty"
        )));
    }
    Ok(secret)
}

/// Validate that a credential key is safe and sensible.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 128 characters.
pub fn validate_credential_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(HqError::InvalidCredential("key cannot be empty".into()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(HqError::InvalidCredential(format!(
            "key cannot exceed {MAX_KEY_LEN} characters"
        )));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(HqError::InvalidCredential(format!(
            "key '{key}' contains invalid characters — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }
    Ok(())
}

/// Validate that a credential label is not blank.
pub fn validate_credential_label(label: &str) -> Result<()> {
    if label.trim().is_empty() {
        return Err(HqError::InvalidCredential("label cannot be empty".into()));
    }
    Ok(())
}
