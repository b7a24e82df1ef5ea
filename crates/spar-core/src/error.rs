//! Error types for Spar

use thiserror::Error;

/// The main error type for Spar operations
#[derive(Debug, Error)]
pub enum SparError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Definition parse error: {0}")]
    DefParseError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Stage error: {0}")]
    StageError(String),

    #[error("Script compile error: {0}")]
    CompileError(String),

    #[error("Script link error: {0}")]
    LinkError(String),

    #[error("Asset error: {0}")]
    AssetError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Roster has no selectable non-random entries")]
    RosterExhausted,
}

/// Result type alias for Spar operations
pub type Result<T> = std::result::Result<T, SparError>;

impl From<toml::de::Error> for SparError {
    fn from(err: toml::de::Error) -> Self {
        SparError::TomlParseError(err.to_string())
    }
}
