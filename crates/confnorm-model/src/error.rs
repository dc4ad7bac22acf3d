use thiserror::Error;

/// Reasons an accessor could not produce its value.
///
/// An accessor failure never aborts a traversal; the accessor is skipped and
/// the failure is recorded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("access denied: {0}")]
    Denied(String),

    #[error("accessor failed: {0}")]
    Failed(String),
}
