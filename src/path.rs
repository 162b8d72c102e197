//! Locations of failures inside a decoded value.
//!
//! A [`ValuePath`] names where a codec failure occurred, e.g. `order.created`.
//! Object codecs extend the path with the field they are checking so a nested
//! failure always reports the full route from the root of the input.

use std::fmt::{self, Display};

/// One step of a [`ValuePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A property of an object (e.g., `created`).
    Field(String),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }
}

/// The route from the root of an input value to one of its parts.
///
/// Paths are immutable; `push_*` returns an extended copy.
///
/// # Example
///
/// ```rust
/// use codecs::ValuePath;
///
/// let path = ValuePath::root()
///     .push_field("order")
///     .push_field("customer")
///     .push_field("placed_at");
///
/// assert_eq!(path.to_string(), "order.customer.placed_at");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// The path of the input value itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-field path.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self::root().push_field(name)
    }

    /// Returns a copy of this path extended with a field.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{}", name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let path = ValuePath::root();
        assert!(path.is_root());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert!(path.parent().is_none());
    }

    #[test]
    fn test_display_nested_fields() {
        let path = ValuePath::root()
            .push_field("payload")
            .push_field("owner")
            .push_field("id");
        assert_eq!(path.to_string(), "payload.owner.id");
    }

    #[test]
    fn test_push_does_not_mutate() {
        let base = ValuePath::from_field("items");
        let first = base.push_field("first");
        let second = base.push_field("second");

        assert_eq!(base.to_string(), "items");
        assert_eq!(first.to_string(), "items.first");
        assert_eq!(second.to_string(), "items.second");
    }

    #[test]
    fn test_parent_and_last() {
        let path = ValuePath::from_field("a").push_field("b");
        assert_eq!(path.last(), Some(&PathSegment::field("b")));
        assert_eq!(path.parent(), Some(ValuePath::from_field("a")));
    }
}
