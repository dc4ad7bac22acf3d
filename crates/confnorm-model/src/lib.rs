//! Configuration model interface for confnorm.
//!
//! A configuration provider describes its object graph to the normalizer by
//! implementing [`Introspect`] on every value that can appear in the graph.
//! Each value classifies itself as one of a closed set of [`Node`] kinds, and
//! configuration nodes enumerate their accessors through an
//! [`AccessorVisitor`]. Protocol-stack components expose explicitly tagged
//! fields through [`ProtocolComponent`] instead.
//!
//! # Key Types
//!
//! - [`Introspect`] / [`Node`] -- Classification of a graph value
//! - [`ConfigNode`] / [`AccessorVisitor`] -- Accessor enumeration for configuration nodes
//! - [`ProtocolComponent`] / [`ProtocolStack`] -- Tagged-field components
//! - [`Path`] / [`Segment`] -- Dotted/indexed key paths
//! - [`FlatConfig`] -- The flattened path → value mapping

pub mod error;
pub mod flat;
#[cfg(feature = "json")]
mod json;
mod macros;
pub mod node;
pub mod path;
pub mod protocol;
mod std_impls;

pub use error::AccessError;
pub use flat::FlatConfig;
pub use node::{AccessorVisitor, ConfigNode, Introspect, Node};
pub use path::{extend, Path, Segment};
pub use protocol::{FieldVisitor, ProtocolComponent, ProtocolStack};

/// Literal recorded for absent values.
pub const NULL_VALUE: &str = "null";
