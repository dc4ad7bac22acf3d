//! Error types for the store crate.

/// Errors that can occur while writing a flattened configuration.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The output sink could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An output format name was not recognised.
    #[error("unknown output format: {0}")]
    UnknownFormat(String),
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
