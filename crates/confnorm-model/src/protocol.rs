//! Protocol-stack components with explicitly tagged configurable fields.
//!
//! Unlike configuration nodes, components are not classified by type: only
//! fields the component tags as configurable are reported, and each is taken
//! as a terminal value.

use std::fmt;

/// One component of a protocol/transport stack.
pub trait ProtocolComponent {
    /// The component's name, used as a path segment (e.g. `TCP`).
    fn name(&self) -> &str;

    /// Report every field tagged as configurable, including fields that are
    /// not otherwise exposed. `None` means the field is unset.
    fn tagged_fields(&self, visitor: &mut dyn FieldVisitor);
}

/// Receives the tagged fields of a [`ProtocolComponent`].
pub trait FieldVisitor {
    fn field(&mut self, name: &str, value: Option<&dyn fmt::Display>);
}

/// An ordered stack of protocol components.
pub trait ProtocolStack {
    /// The components in declared stack order.
    fn components(&self) -> Vec<&dyn ProtocolComponent>;
}

impl<C: ProtocolComponent> ProtocolStack for [C] {
    fn components(&self) -> Vec<&dyn ProtocolComponent> {
        self.iter().map(|c| c as &dyn ProtocolComponent).collect()
    }
}

impl<C: ProtocolComponent> ProtocolStack for Vec<C> {
    fn components(&self) -> Vec<&dyn ProtocolComponent> {
        self.as_slice().components()
    }
}
