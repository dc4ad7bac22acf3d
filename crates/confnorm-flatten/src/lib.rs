//! Flattening engine for confnorm.
//!
//! Walks a configuration graph described through [`confnorm_model`] and
//! records one `path → value` entry per terminal node:
//!
//! - absent values are recorded as `"null"`;
//! - configuration nodes recurse into each accessor at `prefix.accessor`;
//! - sequences recurse into each element at `prefix[i]`;
//! - opaque values are recorded by their fully qualified type name;
//! - leaves are recorded by their textual form.
//!
//! Protocol-stack components are handled by [`extract_tagged`], which records
//! only explicitly tagged fields and never recurses.
//!
//! # Key Types
//!
//! - [`Flattener`] / [`FlattenOptions`] -- Graph traversal and its limits
//! - [`FlattenReport`] / [`SkippedAccessor`] -- What a traversal produced and skipped
//! - [`FlattenError`] -- Cycles and depth overruns

pub mod engine;
pub mod error;
pub mod options;
pub mod tagged;

pub use engine::{flatten, flatten_roots, FlattenReport, Flattener, SkippedAccessor};
pub use error::{FlattenError, FlattenResult};
pub use options::FlattenOptions;
pub use tagged::{extract_stack, extract_tagged};
