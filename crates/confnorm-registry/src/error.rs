//! Error types for registry operations.

use thiserror::Error;

use confnorm_flatten::FlattenError;
use confnorm_store::StoreError;

use crate::registry::ManagerHandle;

/// Errors that can occur while registering or normalizing cache managers.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No manager is registered under this handle.
    #[error("unknown cache manager: {0}")]
    UnknownManager(ManagerHandle),

    /// A manager is already registered under this handle.
    #[error("cache manager already registered: {handle} ({name})")]
    AlreadyRegistered { handle: ManagerHandle, name: String },

    /// The manager has no cache with this name.
    #[error("cache manager {manager} has no cache named {cache:?}")]
    UnknownCache { manager: String, cache: String },

    /// The manager has no transport stack.
    #[error("cache manager {manager} has no transport configured")]
    NoTransport { manager: String },

    /// Traversal of a configuration graph failed.
    #[error("flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// Writing a normalized view failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The registry lock was poisoned by a panicking writer.
    #[error("registry lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
