//! Registry of cache managers and their normalized configuration views.
//!
//! A [`Registry`] is an ordinary value owned by its caller: there is no
//! process-wide state. Each registered manager carries a global
//! configuration root, any number of named cache configurations and an
//! optional transport protocol stack. Views flatten some or all of these
//! into a [`FlatConfig`](confnorm_model::FlatConfig) which can be saved in
//! either [`Format`](confnorm_store::Format).
//!
//! # Key Types
//!
//! - [`Registry`] -- thread-safe handle → manager mapping
//! - [`ManagerHandle`] -- opaque identity of a registered manager
//! - [`View`] -- which part of a manager's configuration to normalize
//! - [`RegistryError`] -- lookup, traversal and persistence failures

pub mod error;
pub mod registry;

pub use error::{RegistryError, RegistryResult};
pub use registry::{
    ManagerHandle, Registry, SharedNode, SharedStack, View, CACHE_PREFIX, GLOBAL_PREFIX,
    TRANSPORT_PREFIX,
};
