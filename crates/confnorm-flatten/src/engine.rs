//! Recursive traversal of configuration graphs.

use std::collections::HashSet;

use confnorm_model::{
    extend, AccessError, AccessorVisitor, ConfigNode, FlatConfig, Introspect, Node, Segment,
    NULL_VALUE,
};
use tracing::{debug, warn};

use crate::error::{FlattenError, FlattenResult};
use crate::options::FlattenOptions;

/// An accessor that could not be invoked and was left out of the mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedAccessor {
    /// The path the accessor's value would have been recorded under.
    pub path: String,
    pub error: AccessError,
}

/// Outcome of a successful traversal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Number of entries recorded.
    pub entries: usize,
    /// Accessors that were skipped, in traversal order.
    pub skipped: Vec<SkippedAccessor>,
}

impl FlattenReport {
    /// Fold another report into this one.
    pub fn absorb(&mut self, other: FlattenReport) {
        self.entries += other.entries;
        self.skipped.extend(other.skipped);
    }
}

/// Walks configuration graphs under a fixed set of [`FlattenOptions`].
#[derive(Clone, Debug, Default)]
pub struct Flattener {
    options: FlattenOptions,
}

impl Flattener {
    pub fn new(options: FlattenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FlattenOptions {
        &self.options
    }

    /// Flatten `value` into `out`, rooting every path at `prefix`.
    ///
    /// Entries are only added to `out` when the whole traversal succeeds; on
    /// error `out` is left as it was.
    pub fn flatten(
        &self,
        value: &dyn Introspect,
        prefix: &str,
        out: &mut FlatConfig,
    ) -> FlattenResult<FlattenReport> {
        let mut walk = Walk {
            options: &self.options,
            out: FlatConfig::new(),
            visiting: HashSet::new(),
            skipped: Vec::new(),
        };
        walk.walk(value, prefix, 0)?;

        let report = FlattenReport {
            entries: walk.out.len(),
            skipped: walk.skipped,
        };
        out.merge(walk.out);
        debug!(
            prefix,
            entries = report.entries,
            skipped = report.skipped.len(),
            "flattened configuration root"
        );
        Ok(report)
    }

    /// Flatten several labelled roots into one mapping.
    pub fn flatten_roots(
        &self,
        roots: &[(&str, &dyn Introspect)],
        out: &mut FlatConfig,
    ) -> FlattenResult<FlattenReport> {
        let mut report = FlattenReport::default();
        for (prefix, root) in roots {
            report.absorb(self.flatten(*root, prefix, out)?);
        }
        Ok(report)
    }
}

/// Flatten `value` into `out` with default options.
pub fn flatten(
    value: &dyn Introspect,
    prefix: &str,
    out: &mut FlatConfig,
) -> FlattenResult<FlattenReport> {
    Flattener::default().flatten(value, prefix, out)
}

/// Flatten several labelled roots into `out` with default options.
pub fn flatten_roots(
    roots: &[(&str, &dyn Introspect)],
    out: &mut FlatConfig,
) -> FlattenResult<FlattenReport> {
    Flattener::default().flatten_roots(roots, out)
}

/// Identity of a node on the traversal stack.
#[derive(Clone, PartialEq, Eq, Hash)]
enum NodeKey {
    /// The type name is part of the key because a struct and its first field
    /// share an address.
    Config { addr: usize, type_name: String },
    /// A sequence is identified by its own address and that of its first
    /// element, so a wrapper holding a sequence at the same address is not
    /// mistaken for it.
    Sequence { addr: usize, first: usize },
}

fn addr_of<T: ?Sized>(value: &T) -> usize {
    std::ptr::from_ref(value).cast::<()>() as usize
}

struct Walk<'f> {
    options: &'f FlattenOptions,
    out: FlatConfig,
    visiting: HashSet<NodeKey>,
    skipped: Vec<SkippedAccessor>,
}

impl Walk<'_> {
    fn walk(&mut self, value: &dyn Introspect, path: &str, depth: usize) -> FlattenResult<()> {
        match value.classify() {
            Node::Null => self.record(path, NULL_VALUE.to_string()),
            Node::Leaf(text) => self.record(path, text),
            Node::Opaque(type_name) => self.record(path, type_name),
            Node::Sequence(items) => {
                self.descend(path, depth)?;
                let key = match items.first() {
                    Some(first) => self.enter_sequence(value, *first, path)?,
                    None => None,
                };

                let result = items.into_iter().enumerate().try_for_each(|(i, item)| {
                    self.walk(item, &extend(path, &Segment::Index(i)), depth + 1)
                });

                if let Some(key) = key {
                    self.visiting.remove(&key);
                }
                result?;
            }
            Node::Config(node) => {
                self.descend(path, depth)?;
                let key = self.enter(node, path)?;

                let mut accessors = Accessors {
                    walk: self,
                    path,
                    depth: depth + 1,
                    error: None,
                };
                node.accessors(&mut accessors);
                let error = accessors.error;

                if let Some(key) = key {
                    self.visiting.remove(&key);
                }
                if let Some(error) = error {
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, path: &str, value: String) {
        if let Some(previous) = self.out.insert(path, value) {
            warn!(path, previous = %previous, "path recorded twice; keeping the later value");
        }
    }

    fn descend(&self, path: &str, depth: usize) -> FlattenResult<()> {
        match self.options.max_depth {
            Some(limit) if depth >= limit => Err(FlattenError::DepthExceeded {
                path: path.to_string(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn enter(&mut self, node: &dyn ConfigNode, path: &str) -> FlattenResult<Option<NodeKey>> {
        if !self.options.detect_cycles {
            return Ok(None);
        }
        let key = NodeKey::Config {
            addr: addr_of(node),
            type_name: node.type_name().to_string(),
        };
        self.visit_once(key, path, node.type_name())
    }

    fn enter_sequence(
        &mut self,
        sequence: &dyn Introspect,
        first: &dyn Introspect,
        path: &str,
    ) -> FlattenResult<Option<NodeKey>> {
        if !self.options.detect_cycles {
            return Ok(None);
        }
        let key = NodeKey::Sequence {
            addr: addr_of(sequence),
            first: addr_of(first),
        };
        self.visit_once(key, path, "sequence")
    }

    fn visit_once(
        &mut self,
        key: NodeKey,
        path: &str,
        type_name: &str,
    ) -> FlattenResult<Option<NodeKey>> {
        if !self.visiting.insert(key.clone()) {
            return Err(FlattenError::Cycle {
                path: path.to_string(),
                type_name: type_name.to_string(),
            });
        }
        Ok(Some(key))
    }
}

/// Receives the accessors of one configuration node and recurses into each.
struct Accessors<'w, 'f> {
    walk: &'w mut Walk<'f>,
    path: &'w str,
    depth: usize,
    error: Option<FlattenError>,
}

impl AccessorVisitor for Accessors<'_, '_> {
    fn visit(&mut self, name: &str, value: Result<&dyn Introspect, AccessError>) {
        if self.error.is_some() {
            return;
        }
        let path = extend(self.path, &Segment::member(name));
        match value {
            Ok(child) => {
                if let Err(e) = self.walk.walk(child, &path, self.depth) {
                    self.error = Some(e);
                }
            }
            Err(error) => {
                warn!(path = %path, error = %error, "skipping accessor");
                self.walk.skipped.push(SkippedAccessor { path, error });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::OnceCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use confnorm_model::{config_node, opaque_node};
    use proptest::prelude::*;

    use super::*;

    struct Eviction {
        strategy: String,
        max_entries: i64,
    }

    config_node!(Eviction { strategy, max_entries });

    struct Listener {
        class: String,
    }

    config_node!(Listener { class });

    struct Global {
        listeners: Vec<Listener>,
        marshaller: Marshaller,
        machine_id: Option<String>,
    }

    config_node!(Global { listeners, marshaller, machine_id });

    struct Marshaller;

    opaque_node!(Marshaller);

    struct Cache {
        eviction: Eviction,
    }

    config_node!(Cache { eviction });

    fn flat(value: &dyn Introspect, prefix: &str) -> FlatConfig {
        let mut out = FlatConfig::new();
        flatten(value, prefix, &mut out).unwrap();
        out
    }

    fn global() -> Global {
        Global {
            listeners: vec![
                Listener { class: "org.example.A".into() },
                Listener { class: "org.example.B".into() },
            ],
            marshaller: Marshaller,
            machine_id: None,
        }
    }

    #[test]
    fn nested_config_nodes_use_dotted_paths() {
        let cache = Cache {
            eviction: Eviction { strategy: "LRU".into(), max_entries: 10_000 },
        };
        let out = flat(&cache, "cache.default");
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("cache.default.eviction.strategy"), Some("LRU"));
        assert_eq!(out.get("cache.default.eviction.max_entries"), Some("10000"));
    }

    #[test]
    fn global_graph_mixes_node_kinds() {
        let out = flat(&global(), "global");
        assert_eq!(out.len(), 4);
        assert_eq!(out.get("global.listeners[0].class"), Some("org.example.A"));
        assert_eq!(out.get("global.listeners[1].class"), Some("org.example.B"));
        assert_eq!(out.get("global.machine_id"), Some("null"));
        assert_eq!(
            out.get("global.marshaller"),
            Some(std::any::type_name::<Marshaller>())
        );
    }

    #[test]
    fn opaque_value_records_type_name_not_identity() {
        let out = flat(&Marshaller, "m");
        let value = out.get("m").unwrap();
        assert!(value.ends_with("engine::tests::Marshaller"));
        assert!(!value.contains('@'));
    }

    #[test]
    fn single_absent_member_yields_one_null_entry() {
        struct Holder {
            value: Option<u32>,
        }
        config_node!(Holder { value });

        let out = flat(&Holder { value: None }, "parent");
        assert_eq!(out.len(), 1);
        assert_eq!(out.get("parent.value"), Some("null"));
    }

    #[test]
    fn sequence_expands_with_indices() {
        let list = vec!["x".to_string(), "y".to_string()];
        let out = flat(&list, "list");
        let expected: FlatConfig = [("list[0]", "x"), ("list[1]", "y")].into_iter().collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_prefix_has_no_leading_separator() {
        let out = flat(&global(), "");
        assert!(out.contains_key("listeners[0].class"));
        assert!(out.contains_key("machine_id"));

        let out = flat(&vec![1u8], "");
        assert_eq!(out.get("[0]"), Some("1"));
    }

    #[test]
    fn root_null_and_leaf() {
        assert_eq!(flat(&None::<u8>, "a").get("a"), Some("null"));
        assert_eq!(flat(&42u16, "a").get("a"), Some("42"));
    }

    #[test]
    fn nested_sequences_and_null_elements() {
        let grid = vec![vec![Some(1u8), None], vec![]];
        let out = flat(&grid, "g");
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("g[0][0]"), Some("1"));
        assert_eq!(out.get("g[0][1]"), Some("null"));
    }

    #[test]
    fn failing_accessor_is_skipped() {
        struct Partial;
        impl ConfigNode for Partial {
            fn accessors(&self, visitor: &mut dyn AccessorVisitor) {
                visitor.field("a", &1u8);
                visitor.skip("secret", AccessError::Denied("not accessible".into()));
                visitor.field("c", &3u8);
            }
        }
        impl Introspect for Partial {
            fn classify(&self) -> Node<'_> {
                Node::Config(self)
            }
        }

        let mut out = FlatConfig::new();
        let report = flatten(&Partial, "p", &mut out).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("p.a"), Some("1"));
        assert_eq!(out.get("p.c"), Some("3"));
        assert!(!out.contains_key("p.secret"));
        assert_eq!(report.entries, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, "p.secret");
    }

    struct Link {
        name: String,
        next: OnceCell<Rc<Link>>,
    }

    config_node!(Link { name, next });

    fn link(name: &str) -> Rc<Link> {
        Rc::new(Link { name: name.into(), next: OnceCell::new() })
    }

    #[test]
    fn cycle_is_reported_and_output_untouched() {
        let a = link("a");
        let b = link("b");
        assert!(a.next.set(b.clone()).is_ok());
        assert!(b.next.set(a.clone()).is_ok());

        let mut out: FlatConfig = [("existing", "1")].into_iter().collect();
        let err = flatten(&a, "ring", &mut out).unwrap_err();
        match err {
            FlattenError::Cycle { path, type_name } => {
                assert_eq!(path, "ring.next.next");
                assert!(type_name.ends_with("::Link"));
            }
            other => panic!("expected Cycle, got {other:?}"),
        }
        assert_eq!(out.len(), 1);
    }

    struct Ring {
        members: OnceCell<Vec<Rc<Ring>>>,
    }

    impl Introspect for Ring {
        fn classify(&self) -> Node<'_> {
            match self.members.get() {
                Some(members) => Node::sequence(members),
                None => Node::Null,
            }
        }
    }

    #[test]
    fn self_containing_sequence_is_a_cycle() {
        let ring = Rc::new(Ring { members: OnceCell::new() });
        assert!(ring.members.set(vec![ring.clone()]).is_ok());

        let mut out = FlatConfig::new();
        let err = flatten(&ring, "ring", &mut out).unwrap_err();
        assert_eq!(
            err,
            FlattenError::Cycle { path: "ring[0][0]".into(), type_name: "sequence".into() }
        );
        assert!(out.is_empty());
    }

    #[test]
    fn wrapper_around_sequence_is_not_a_cycle() {
        struct Wrapper {
            inner: Vec<u8>,
        }
        impl Introspect for Wrapper {
            fn classify(&self) -> Node<'_> {
                Node::Sequence(vec![&self.inner as &dyn Introspect])
            }
        }

        let out = flat(&Wrapper { inner: vec![7, 8] }, "w");
        assert_eq!(out.keys_sorted(), ["w[0][0]", "w[0][1]"]);
    }

    #[test]
    fn shared_node_without_cycle_is_visited_twice() {
        struct Pair {
            left: Rc<Link>,
            right: Rc<Link>,
        }
        config_node!(Pair { left, right });

        let shared = link("shared");
        let pair = Pair { left: shared.clone(), right: shared };
        let out = flat(&pair, "");
        assert_eq!(out.get("left.name"), Some("shared"));
        assert_eq!(out.get("right.name"), Some("shared"));
        assert_eq!(out.get("right.next"), Some("null"));
    }

    #[test]
    fn struct_sharing_address_with_first_field_is_not_a_cycle() {
        let cache = Cache {
            eviction: Eviction { strategy: "NONE".into(), max_entries: -1 },
        };
        assert_eq!(flat(&cache, "c").len(), 2);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let cache = Cache {
            eviction: Eviction { strategy: "LRU".into(), max_entries: 1 },
        };
        let shallow = Flattener::new(FlattenOptions { max_depth: Some(1), ..Default::default() });
        let mut out = FlatConfig::new();
        let err = shallow.flatten(&cache, "c", &mut out).unwrap_err();
        assert_eq!(err, FlattenError::DepthExceeded { path: "c.eviction".into(), limit: 1 });
        assert!(out.is_empty());

        let enough = Flattener::new(FlattenOptions { max_depth: Some(2), ..Default::default() });
        assert_eq!(enough.flatten(&cache, "c", &mut out).unwrap().entries, 2);
    }

    #[test]
    fn roots_merge_into_one_mapping() {
        let cache = Cache {
            eviction: Eviction { strategy: "LRU".into(), max_entries: 5 },
        };
        let g = global();
        let mut out = FlatConfig::new();
        let report = flatten_roots(
            &[("global", &g as &dyn Introspect), ("cache.default", &cache as &dyn Introspect)],
            &mut out,
        )
        .unwrap();
        assert_eq!(report.entries, 6);
        assert_eq!(out.len(), 6);
        assert!(out.contains_key("cache.default.eviction.strategy"));
    }

    #[derive(Clone, Debug)]
    enum Tree {
        Null,
        Leaf(String),
        List(Vec<Tree>),
        Map(BTreeMap<String, Tree>),
    }

    impl Introspect for Tree {
        fn classify(&self) -> Node<'_> {
            match self {
                Tree::Null => Node::Null,
                Tree::Leaf(s) => Node::leaf(s),
                Tree::List(items) => Node::sequence(items),
                Tree::Map(map) => Node::Config(map),
            }
        }
    }

    impl Tree {
        fn terminals(&self) -> usize {
            match self {
                Tree::Null | Tree::Leaf(_) => 1,
                Tree::List(items) => items.iter().map(Tree::terminals).sum(),
                Tree::Map(map) => map.values().map(Tree::terminals).sum(),
            }
        }
    }

    fn tree() -> impl Strategy<Value = Tree> {
        let leaf = prop_oneof![Just(Tree::Null), "[a-z0-9]{0,6}".prop_map(Tree::Leaf)];
        leaf.prop_recursive(4, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Tree::List),
                prop::collection::btree_map("[a-z]{1,5}", inner, 0..6).prop_map(Tree::Map),
            ]
        })
    }

    proptest! {
        #[test]
        fn one_entry_per_terminal(t in tree()) {
            let mut out = FlatConfig::new();
            let report = flatten(&t, "root", &mut out).unwrap();
            prop_assert_eq!(out.len(), t.terminals());
            prop_assert_eq!(report.entries, t.terminals());
        }

        #[test]
        fn flattening_is_deterministic(t in tree()) {
            let mut first = FlatConfig::new();
            let mut second = FlatConfig::new();
            flatten(&t, "", &mut first).unwrap();
            flatten(&t, "", &mut second).unwrap();
            prop_assert_eq!(first.sorted(), second.sorted());
        }
    }
}
