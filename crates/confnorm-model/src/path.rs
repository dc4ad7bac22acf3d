//! Key paths into a flattened configuration.
//!
//! Member segments are joined with `.`, index segments are appended directly
//! as `[i]`. An empty prefix never produces a leading separator:
//!
//! | Prefix    | Segment       | Result      |
//! |-----------|---------------|-------------|
//! | `""`      | member `a`    | `a`         |
//! | `"a"`     | member `b`    | `a.b`       |
//! | `"a"`     | index `2`     | `a[2]`      |
//! | `""`      | index `0`     | `[0]`       |

use std::fmt;

/// One step in a [`Path`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named member access, rendered as `.name`.
    Member(String),
    /// Sequence index, rendered as `[i]`.
    Index(usize),
}

impl Segment {
    /// Create a member segment.
    pub fn member(name: impl Into<String>) -> Self {
        Self::Member(name.into())
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Self::Member(name.to_string())
    }
}

/// Append one segment to an already rendered prefix.
///
/// # Examples
///
/// ```
/// use confnorm_model::{extend, Segment};
///
/// assert_eq!(extend("", &Segment::member("a")), "a");
/// assert_eq!(extend("a", &Segment::member("b")), "a.b");
/// assert_eq!(extend("a", &Segment::Index(2)), "a[2]");
/// assert_eq!(extend("", &Segment::Index(0)), "[0]");
/// ```
pub fn extend(prefix: &str, segment: &Segment) -> String {
    match segment {
        Segment::Index(i) => format!("{prefix}[{i}]"),
        Segment::Member(name) if prefix.is_empty() => name.clone(),
        Segment::Member(name) => format!("{prefix}.{name}"),
    }
}

/// An ordered sequence of segments, rendered with [`extend`].
///
/// Prefix labels such as `cache.default` may be pushed as a single member
/// segment; rendering is the same as pushing `cache` and `default` separately.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Builder-style member append.
    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::Member(name.into()));
        self
    }

    /// Builder-style index append.
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    /// Render to the flattened key form.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .fold(String::new(), |acc, seg| extend(&acc, seg))
    }
}

impl From<&str> for Path {
    /// A label becomes one member segment; the empty label is the root.
    fn from(label: &str) -> Self {
        if label.is_empty() {
            Self::root()
        } else {
            Self::root().member(label)
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
