use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::env::EnvSource;
use crate::errors::{HqError, Result};

/// Overrides the secrets document path.
pub const SECRETS_PATH_ENV: &str = "KIWY_HQ_SECRETS_PATH";
/// Overrides the credentials document path.
pub const CREDENTIALS_PATH_ENV: &str = "KIWY_HQ_CREDENTIALS_PATH";
/// Overrides the status document path.
pub const STATUS_PATH_ENV: &str = "KIWY_HQ_STATUS_PATH";

/// Project-level configuration, loaded from `.kiwy-hq.toml`.
///
/// Every field has a default so HQ works without any config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the project root) holding the JSON documents.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Explicit path for `secrets.json`.
    #[serde(default)]
    pub secrets_path: Option<PathBuf>,

    /// Explicit path for `credentials.json`.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,

    /// Explicit path for `hq-status.json`.
    #[serde(default)]
    pub status_path: Option<PathBuf>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    "data".to_string()
}

// ── Resolved paths ───────────────────────────────────────────────────

/// Where each store keeps its document.  Passed explicitly to every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub secrets: PathBuf,
    pub credentials: PathBuf,
    pub status: PathBuf,
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            secrets_path: None,
            credentials_path: None,
            status_path: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".kiwy-hq.toml";

    /// Load settings from `<project_dir>/.kiwy-hq.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            HqError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Resolve the three document paths.
    ///
    /// Order per store: environment override, explicit setting, then
    /// `<project_dir>/<data_dir>/<default file name>`.  Relative paths are
    /// taken relative to `project_dir`.
    pub fn store_paths(&self, project_dir: &Path, env: &impl EnvSource) -> StorePaths {
        let data_dir = project_dir.join(&self.data_dir);

        let resolve = |env_name: &str, setting: &Option<PathBuf>, file_name: &str| {
            env.var(env_name)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .or_else(|| setting.clone())
                .map(|p| project_dir.join(p))
                .unwrap_or_else(|| data_dir.join(file_name))
        };

        StorePaths {
            secrets: resolve(SECRETS_PATH_ENV, &self.secrets_path, "secrets.json"),
            credentials: resolve(CREDENTIALS_PATH_ENV, &self.credentials_path, "credentials.json"),
            status: resolve(STATUS_PATH_ENV, &self.status_path, "hq-status.json"),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
