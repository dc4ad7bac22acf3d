//! Key-level comparison of flattened configurations.
//!
//! Both mappings are walked once in key order, side by side, so the changes
//! come out sorted without a separate sorting pass.

use std::cmp::Ordering;

use confnorm_model::FlatConfig;

/// One key that differs between two flattened configurations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    /// Only the new configuration has this key.
    Added { key: String, value: String },
    /// Only the old configuration has this key.
    Removed { key: String, value: String },
    Modified {
        key: String,
        old: String,
        new: String,
    },
}

impl ConfigChange {
    pub fn key(&self) -> &str {
        match self {
            ConfigChange::Added { key, .. }
            | ConfigChange::Removed { key, .. }
            | ConfigChange::Modified { key, .. } => key,
        }
    }
}

/// Every changed key, in key order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDiff {
    pub changes: Vec<ConfigChange>,
}

impl ConfigDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.count(|c| matches!(c, ConfigChange::Added { .. }))
    }

    pub fn removals(&self) -> usize {
        self.count(|c| matches!(c, ConfigChange::Removed { .. }))
    }

    pub fn modifications(&self) -> usize {
        self.count(|c| matches!(c, ConfigChange::Modified { .. }))
    }

    fn count(&self, kind: impl Fn(&ConfigChange) -> bool) -> usize {
        self.changes.iter().filter(|c| kind(c)).count()
    }
}

/// Compare `old` against `new`.
pub fn diff_configs(old: &FlatConfig, new: &FlatConfig) -> ConfigDiff {
    let mut before = old.sorted().into_iter().peekable();
    let mut after = new.sorted().into_iter().peekable();
    let mut changes = Vec::new();

    loop {
        let order = match (before.peek(), after.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((b, _)), Some((a, _))) => b.cmp(a),
        };
        match order {
            Ordering::Less => {
                if let Some((key, value)) = before.next() {
                    changes.push(ConfigChange::Removed {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
            Ordering::Greater => {
                if let Some((key, value)) = after.next() {
                    changes.push(ConfigChange::Added {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
            }
            Ordering::Equal => {
                if let (Some((key, was)), Some((_, is))) = (before.next(), after.next()) {
                    if was != is {
                        changes.push(ConfigChange::Modified {
                            key: key.to_string(),
                            old: was.to_string(),
                            new: is.to_string(),
                        });
                    }
                }
            }
        }
    }

    ConfigDiff { changes }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    fn flat(pairs: &[(&str, &str)]) -> FlatConfig {
        pairs.iter().copied().collect()
    }

    #[test]
    fn unset_field_becoming_set_is_modified() {
        let old = flat(&[("global.transport.machineId", "null"), ("global.transport.clusterName", "ISPN")]);
        let new = flat(&[("global.transport.machineId", "m1"), ("global.transport.clusterName", "ISPN")]);

        let diff = diff_configs(&old, &new);
        assert_eq!(
            diff.changes,
            [ConfigChange::Modified {
                key: "global.transport.machineId".into(),
                old: "null".into(),
                new: "m1".into(),
            }]
        );
    }

    #[test]
    fn growing_sequence_adds_indexed_keys() {
        let old = flat(&[("global.listeners[0].class", "org.example.A")]);
        let new = flat(&[
            ("global.listeners[0].class", "org.example.A"),
            ("global.listeners[1].class", "org.example.B"),
        ]);

        let diff = diff_configs(&old, &new);
        assert_eq!(diff.additions(), 1);
        assert_eq!(diff.changes[0].key(), "global.listeners[1].class");
        assert_eq!(diff_configs(&new, &old).removals(), 1);
    }

    #[test]
    fn cache_rename_is_removal_plus_addition() {
        let old = flat(&[("cache.users.eviction.strategy", "LRU")]);
        let new = flat(&[("cache.accounts.eviction.strategy", "LRU")]);

        let diff = diff_configs(&old, &new);
        assert_eq!(
            diff.changes,
            [
                ConfigChange::Added {
                    key: "cache.accounts.eviction.strategy".into(),
                    value: "LRU".into(),
                },
                ConfigChange::Removed {
                    key: "cache.users.eviction.strategy".into(),
                    value: "LRU".into(),
                },
            ]
        );
    }

    #[test]
    fn interleaved_keys_come_out_in_order() {
        let old = flat(&[("a", "1"), ("c", "3"), ("e", "5")]);
        let new = flat(&[("b", "2"), ("c", "30"), ("d", "4")]);

        let diff = diff_configs(&old, &new);
        let keys: Vec<&str> = diff.changes.iter().map(ConfigChange::key).collect();
        assert_eq!(keys, ["a", "b", "c", "d", "e"]);
        assert_eq!((diff.additions(), diff.removals(), diff.modifications()), (2, 2, 1));
    }

    #[test]
    fn identical_mappings_have_no_changes() {
        let map = flat(&[("jgroups.TCP.bind_port", "7800")]);
        assert!(diff_configs(&map, &map).is_empty());
        assert!(diff_configs(&FlatConfig::new(), &FlatConfig::new()).is_empty());
    }

    fn mapping() -> impl Strategy<Value = HashMap<String, String>> {
        prop::collection::hash_map("[a-d]{1,3}", "[0-2]", 0..12)
    }

    proptest! {
        #[test]
        fn changes_are_strictly_ordered_and_complete(old in mapping(), new in mapping()) {
            let before: FlatConfig = old.clone().into_iter().collect();
            let after: FlatConfig = new.clone().into_iter().collect();
            let diff = diff_configs(&before, &after);

            for pair in diff.changes.windows(2) {
                prop_assert!(pair[0].key() < pair[1].key());
            }
            let expected = old.keys().filter(|k| new.get(*k) != old.get(*k)).count()
                + new.keys().filter(|k| !old.contains_key(*k)).count();
            prop_assert_eq!(diff.len(), expected);
        }
    }
}
