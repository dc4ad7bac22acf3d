//! The flattened mapping from rendered paths to string values.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

/// Flattened configuration: rendered path → string value.
///
/// Backed by a hash map, so iteration order is unspecified. Anything that
/// needs a stable order (serialization, diffing) goes through [`sorted`].
///
/// [`sorted`]: FlatConfig::sorted
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatConfig {
    entries: HashMap<String, String>,
}

impl FlatConfig {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the value it displaced, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Look up a value by exact path.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Move all entries of `other` into `self`. Returns the number of keys that
    /// were already present; for those the value from `other` wins.
    pub fn merge(&mut self, other: FlatConfig) -> usize {
        let mut displaced = 0;
        for (key, value) in other.entries {
            if let Some(previous) = self.entries.get(&key) {
                warn!(key = %key, previous = %previous, "duplicate key while merging flattened config");
                displaced += 1;
            }
            self.entries.insert(key, value);
        }
        displaced
    }

    /// A key-ordered view of the mapping.
    pub fn sorted(&self) -> BTreeMap<&str, &str> {
        self.iter().collect()
    }

    /// Keys in lexicographic order.
    pub fn keys_sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for FlatConfig {
    type Item = (String, String);
    type IntoIter = std::collections::hash_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
