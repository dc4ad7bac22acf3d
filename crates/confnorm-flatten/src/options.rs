use serde::{Deserialize, Serialize};

/// Limits applied while walking a configuration graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenOptions {
    /// Fail with [`FlattenError::Cycle`](crate::FlattenError::Cycle) when a
    /// configuration node or sequence is reached from inside itself. When disabled, a
    /// cyclic graph recurses without bound.
    pub detect_cycles: bool,
    /// Maximum number of nested configuration/sequence levels. `None` means
    /// unlimited.
    pub max_depth: Option<usize>,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            detect_cycles: true,
            max_depth: None,
        }
    }
}

impl FlattenOptions {
    /// Unguarded traversal: no cycle detection, no depth limit.
    pub fn unguarded() -> Self {
        Self {
            detect_cycles: false,
            max_depth: None,
        }
    }
}
