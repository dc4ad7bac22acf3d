//! Diff engine for confnorm.
//!
//! Compares two flattened configurations key by key. Because keys are full
//! paths, a change deep inside a configuration graph shows up as a single
//! modified key.
//!
//! # Key Types
//!
//! - [`ConfigDiff`] / [`ConfigChange`] -- Key-level changes, ordered by key

pub mod config_diff;

pub use config_diff::{diff_configs, ConfigChange, ConfigDiff};
