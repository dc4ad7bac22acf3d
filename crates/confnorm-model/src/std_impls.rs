//! [`Introspect`] for standard library types.

use std::cell::OnceCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use crate::node::{AccessorVisitor, ConfigNode, Introspect, Node};

macro_rules! display_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Introspect for $ty {
                fn classify(&self) -> Node<'_> {
                    Node::leaf(self)
                }
            }
        )*
    };
}

display_leaf!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    str, String, IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr,
);

impl Introspect for PathBuf {
    fn classify(&self) -> Node<'_> {
        Node::leaf(self.display())
    }
}

impl Introspect for Duration {
    fn classify(&self) -> Node<'_> {
        Node::Leaf(format!("{self:?}"))
    }
}

impl<T: Introspect> Introspect for Option<T> {
    fn classify(&self) -> Node<'_> {
        match self {
            Some(value) => value.classify(),
            None => Node::Null,
        }
    }
}

impl<T: Introspect> Introspect for OnceCell<T> {
    fn classify(&self) -> Node<'_> {
        match self.get() {
            Some(value) => value.classify(),
            None => Node::Null,
        }
    }
}

macro_rules! delegate {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Introspect + ?Sized> Introspect for $wrapper<T> {
                fn classify(&self) -> Node<'_> {
                    (**self).classify()
                }
            }
        )*
    };
}

delegate!(Box, Rc, Arc);

impl<T: Introspect + ?Sized> Introspect for &T {
    fn classify(&self) -> Node<'_> {
        (**self).classify()
    }
}

impl<T: Introspect> Introspect for [T] {
    fn classify(&self) -> Node<'_> {
        Node::sequence(self)
    }
}

impl<T: Introspect, const N: usize> Introspect for [T; N] {
    fn classify(&self) -> Node<'_> {
        Node::sequence(self)
    }
}

impl<T: Introspect> Introspect for Vec<T> {
    fn classify(&self) -> Node<'_> {
        Node::sequence(self)
    }
}

impl<T: Introspect> Introspect for VecDeque<T> {
    fn classify(&self) -> Node<'_> {
        Node::sequence(self)
    }
}

impl<T: Introspect> Introspect for BTreeSet<T> {
    fn classify(&self) -> Node<'_> {
        Node::sequence(self)
    }
}

// Keyed maps are configuration nodes whose accessors are their keys, in key
// order.
impl<K: fmt::Display, V: Introspect> ConfigNode for BTreeMap<K, V> {
    fn accessors(&self, visitor: &mut dyn AccessorVisitor) {
        for (key, value) in self {
            visitor.field(&key.to_string(), value);
        }
    }
}

impl<K: fmt::Display, V: Introspect> Introspect for BTreeMap<K, V> {
    fn classify(&self) -> Node<'_> {
        Node::Config(self)
    }
}
