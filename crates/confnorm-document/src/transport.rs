//! Transport protocol stack described in a configuration document.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

use confnorm_model::{FieldVisitor, ProtocolComponent, ProtocolStack};

/// One protocol of the transport stack.
///
/// Only `properties` entries are configurable; every other key of the
/// component table is kept as internal state and never extracted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TransportComponent {
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub internal: Map<String, Value>,
}

impl ProtocolComponent for TransportComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn tagged_fields(&self, visitor: &mut dyn FieldVisitor) {
        for (name, value) in &self.properties {
            match value {
                Value::Null => visitor.field(name, None),
                Value::String(s) => visitor.field(name, Some(s as &dyn fmt::Display)),
                other => visitor.field(name, Some(other as &dyn fmt::Display)),
            }
        }
    }
}

/// The transport stack, bottom-most protocol first.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct TransportStack {
    components: Vec<TransportComponent>,
}

impl TransportStack {
    pub fn new(components: Vec<TransportComponent>) -> Self {
        Self { components }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransportComponent> {
        self.components.iter()
    }
}

impl ProtocolStack for TransportStack {
    fn components(&self) -> Vec<&dyn ProtocolComponent> {
        self.components.components()
    }
}
