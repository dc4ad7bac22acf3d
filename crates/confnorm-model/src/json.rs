//! [`Introspect`] for JSON-shaped documents.
//!
//! Objects are configuration nodes whose accessors are their keys, arrays are
//! sequences, and scalars are leaves. Strings are recorded without quotes.

use serde_json::{Map, Value};

use crate::node::{AccessorVisitor, ConfigNode, Introspect, Node};

impl Introspect for Value {
    fn classify(&self) -> Node<'_> {
        match self {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::leaf(b),
            Value::Number(n) => Node::leaf(n),
            Value::String(s) => Node::leaf(s),
            Value::Array(items) => Node::sequence(items),
            Value::Object(map) => Node::Config(map),
        }
    }
}

impl ConfigNode for Map<String, Value> {
    fn accessors(&self, visitor: &mut dyn AccessorVisitor) {
        for (key, value) in self {
            visitor.field(key, value);
        }
    }
}

impl Introspect for Map<String, Value> {
    fn classify(&self) -> Node<'_> {
        Node::Config(self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_render_without_quotes() {
        for (value, expected) in [
            (json!("LRU"), "LRU"),
            (json!(8192), "8192"),
            (json!(0.5), "0.5"),
            (json!(false), "false"),
        ] {
            match value.classify() {
                Node::Leaf(s) => assert_eq!(s, expected),
                other => panic!("expected Leaf, got {other:?}"),
            }
        }
    }

    #[test]
    fn structure_maps_to_node_kinds() {
        assert!(matches!(json!(null).classify(), Node::Null));
        assert!(matches!(json!([1, 2]).classify(), Node::Sequence(ref v) if v.len() == 2));
        assert!(matches!(json!({"a": 1}).classify(), Node::Config(_)));
    }
}
