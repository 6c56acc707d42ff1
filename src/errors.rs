use thiserror::Error;

/// All errors that can occur in HQ.
///
/// Missing and malformed documents are recovered inside the stores and
/// never show up here.
#[derive(Debug, Error)]
pub enum HqError {
    // --- Store errors ---
    #[error("Unknown secret field '{0}'")]
    UnknownField(String),

    #[error("Unknown project '{0}' (expected qualiver, echo, kuenti or personal)")]
    UnknownProject(String),

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for HQ results.
pub type Result<T> = std::result::Result<T, HqError>;
