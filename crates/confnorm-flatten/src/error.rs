//! Error types for the flattening engine.

/// Errors that abort a traversal.
///
/// Accessor failures are not errors; they are reported in
/// [`FlattenReport::skipped`](crate::FlattenReport::skipped).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// A configuration node was reached again while it was still being visited.
    #[error("cyclic configuration graph at {path:?}: {type_name} is already being visited")]
    Cycle { path: String, type_name: String },

    /// Nesting went deeper than the configured limit.
    #[error("configuration graph deeper than {limit} levels at {path:?}")]
    DepthExceeded { path: String, limit: usize },
}

/// Convenience alias for flattening results.
pub type FlattenResult<T> = Result<T, FlattenError>;
