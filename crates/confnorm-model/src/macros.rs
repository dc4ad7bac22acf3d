/// Declare a struct as a configuration node whose accessors are the listed
/// fields, reported in the listed order.
///
/// ```
/// use confnorm_model::{config_node, ConfigNode, Introspect, Node};
///
/// struct Eviction {
///     strategy: String,
///     max_entries: i64,
/// }
///
/// config_node!(Eviction { strategy, max_entries });
///
/// let eviction = Eviction { strategy: "LRU".into(), max_entries: 10_000 };
/// assert!(matches!(eviction.classify(), Node::Config(_)));
/// ```
#[macro_export]
macro_rules! config_node {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::ConfigNode for $ty {
            fn accessors(&self, visitor: &mut dyn $crate::AccessorVisitor) {
                $( visitor.field(stringify!($field), &self.$field); )*
            }
        }

        impl $crate::Introspect for $ty {
            fn classify(&self) -> $crate::Node<'_> {
                $crate::Node::Config(self)
            }
        }
    };
}

/// Declare types that have no meaningful textual form. They are recorded by
/// their fully qualified type name.
#[macro_export]
macro_rules! opaque_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Introspect for $ty {
                fn classify(&self) -> $crate::Node<'_> {
                    $crate::Node::opaque::<Self>()
                }
            }
        )+
    };
}

/// Declare types rendered through their `Display` implementation, such as
/// enumerations of configuration choices.
#[macro_export]
macro_rules! display_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Introspect for $ty {
                fn classify(&self) -> $crate::Node<'_> {
                    $crate::Node::leaf(self)
                }
            }
        )+
    };
}
