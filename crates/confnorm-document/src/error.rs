//! Error types for configuration documents.

use thiserror::Error;

/// Errors that can occur while loading a configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML text could not be parsed.
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),

    /// The JSON text could not be parsed.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed but does not have the expected sections.
    #[error("invalid document layout: {0}")]
    InvalidLayout(String),
}

/// Convenience alias for document results.
pub type DocumentResult<T> = Result<T, DocumentError>;
