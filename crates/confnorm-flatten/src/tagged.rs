//! Tagged-field extraction for protocol-stack components.
//!
//! Each tagged field is recorded at `prefix.component.field` with its textual
//! form, or `"null"` when unset. Field values are never recursed into.

use std::fmt;

use confnorm_model::{
    extend, FieldVisitor, FlatConfig, ProtocolComponent, ProtocolStack, Segment, NULL_VALUE,
};
use tracing::{debug, warn};

/// Record the tagged fields of one component. Returns the number of fields
/// recorded.
pub fn extract_tagged(
    component: &dyn ProtocolComponent,
    prefix: &str,
    out: &mut FlatConfig,
) -> usize {
    let mut fields = TaggedFields {
        base: extend(prefix, &Segment::member(component.name())),
        out,
        count: 0,
    };
    component.tagged_fields(&mut fields);
    fields.count
}

/// Record every component of `stack`, in stack order, under one shared
/// prefix. Returns the total number of fields recorded.
pub fn extract_stack<S>(stack: &S, prefix: &str, out: &mut FlatConfig) -> usize
where
    S: ProtocolStack + ?Sized,
{
    let components = stack.components();
    let total: usize = components
        .iter()
        .map(|component| extract_tagged(*component, prefix, out))
        .sum();
    debug!(prefix, components = components.len(), fields = total, "extracted protocol stack");
    total
}

struct TaggedFields<'o> {
    base: String,
    out: &'o mut FlatConfig,
    count: usize,
}

impl FieldVisitor for TaggedFields<'_> {
    fn field(&mut self, name: &str, value: Option<&dyn fmt::Display>) {
        let path = extend(&self.base, &Segment::member(name));
        let text = value.map_or_else(|| NULL_VALUE.to_string(), |v| v.to_string());
        if let Some(previous) = self.out.insert(path.as_str(), text) {
            warn!(path = %path, previous = %previous, "tagged field recorded twice");
        }
        self.count += 1;
    }
}
