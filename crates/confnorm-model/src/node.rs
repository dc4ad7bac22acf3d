//! Node classification for configuration graphs.
//!
//! Every value reachable from a configuration root implements [`Introspect`]
//! and reports which kind of [`Node`] it is. The set of kinds is closed; a
//! traversal only ever has to handle these five cases.

use std::fmt;

use crate::error::AccessError;

/// A value that can appear in a configuration graph.
pub trait Introspect {
    /// Classify this value for traversal.
    fn classify(&self) -> Node<'_>;
}

/// The kind of a graph value, as seen by a traversal.
pub enum Node<'a> {
    /// Absent value. Recorded as `"null"`.
    Null,
    /// A configuration-model value; recursed into through its accessors.
    Config(&'a dyn ConfigNode),
    /// An ordered collection; each element is visited at an indexed path.
    Sequence(Vec<&'a dyn Introspect>),
    /// A value with no meaningful textual form. Carries the fully qualified
    /// type name, which is recorded in place of the value.
    Opaque(String),
    /// A terminal value, already rendered to its textual form.
    Leaf(String),
}

impl<'a> Node<'a> {
    /// An opaque node named after `T`.
    pub fn opaque<T: ?Sized>() -> Self {
        Self::Opaque(std::any::type_name::<T>().to_string())
    }

    /// A leaf rendered through `Display`.
    pub fn leaf(value: impl fmt::Display) -> Self {
        Self::Leaf(value.to_string())
    }

    /// A sequence over borrowed elements, in iteration order.
    pub fn sequence<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: Introspect + 'a,
    {
        Self::Sequence(
            items
                .into_iter()
                .map(|item| item as &dyn Introspect)
                .collect(),
        )
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Config(_) => "config",
            Self::Sequence(_) => "sequence",
            Self::Opaque(_) => "opaque",
            Self::Leaf(_) => "leaf",
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Config(node) => write!(f, "Config({})", node.type_name()),
            Self::Sequence(items) => write!(f, "Sequence(len={})", items.len()),
            Self::Opaque(name) => write!(f, "Opaque({name})"),
            Self::Leaf(value) => write!(f, "Leaf({value:?})"),
        }
    }
}

/// A configuration-model value with named, zero-argument accessors.
///
/// Implementations report their accessors in declaration order. Identity-only
/// members (string conversion, hashing) are not accessors and must not be
/// reported.
pub trait ConfigNode {
    /// Fully qualified type name. Used in diagnostics and, together with the
    /// node's address, to recognise a node that is already being visited.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Report each accessor and its value, in a stable order.
    fn accessors(&self, visitor: &mut dyn AccessorVisitor);
}

/// Receives the accessors of a [`ConfigNode`].
///
/// An `Err` value means the accessor could not be invoked; the traversal skips
/// it and carries on with the next one.
pub trait AccessorVisitor {
    fn visit(&mut self, name: &str, value: Result<&dyn Introspect, AccessError>);
}

impl<'v> dyn AccessorVisitor + 'v {
    /// Report an accessor that produced `value`.
    pub fn field(&mut self, name: &str, value: &dyn Introspect) {
        self.visit(name, Ok(value));
    }

    /// Report an accessor that could not be invoked.
    pub fn skip(&mut self, name: &str, error: AccessError) {
        self.visit(name, Err(error));
    }
}
