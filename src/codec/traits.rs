//! The codec contract.
//!
//! Every codec in this crate implements [`CodecLike`]. Composite codecs hold
//! their parts as [`CodecRef`]s, so a codec built once can be shared by any
//! number of composites and threads.

use std::fmt::{self, Display};
use std::sync::Arc;

use stillwater::Validation;

use crate::error::CodecErrors;
use crate::path::ValuePath;
use crate::value::Value;

/// A shared, type-erased codec.
pub type CodecRef = Arc<dyn CodecLike>;

/// Discriminates codec kinds, independent of the codec's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecTag {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    UnknownRecord,
    Union,
    Intersection,
    Interface,
    Partial,
    RequiredOptional,
    Date,
    Capability,
    Enum,
}

impl Display for CodecTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CodecTag::String => "StringType",
            CodecTag::Number => "NumberType",
            CodecTag::Boolean => "BooleanType",
            CodecTag::Null => "NullType",
            CodecTag::Undefined => "UndefinedType",
            CodecTag::UnknownRecord => "UnknownRecordType",
            CodecTag::Union => "UnionType",
            CodecTag::Intersection => "IntersectionType",
            CodecTag::Interface => "InterfaceType",
            CodecTag::Partial => "PartialType",
            CodecTag::RequiredOptional => "RequiredOptionalType",
            CodecTag::Date => "DateType",
            CodecTag::Capability => "CapabilityType",
            CodecTag::Enum => "EnumType",
        };
        f.write_str(tag)
    }
}

/// The field partition of an object codec.
///
/// Used at construction time to detect a child codec redeclaring fields its
/// parent already owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectShape {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl ObjectShape {
    /// Returns true if `field` is declared, required or optional.
    pub fn declares(&self, field: &str) -> bool {
        self.required.iter().chain(&self.optional).any(|f| f == field)
    }

    /// Folds another shape into this one. A field required by either side is
    /// required in the result.
    pub fn merge(mut self, other: ObjectShape) -> Self {
        for field in other.required {
            if !self.required.contains(&field) {
                self.required.push(field);
            }
        }
        for field in other.optional {
            if !self.declares(&field) {
                self.optional.push(field);
            }
        }
        self.optional.retain(|f| !self.required.contains(f));
        self
    }
}

/// A codec: a named runtime type that can check, decode and encode values.
///
/// - [`is`](CodecLike::is) is a non-coercing type guard.
/// - [`validate`](CodecLike::validate) decodes, reporting every failure with
///   its path; [`decode`](CodecLike::decode) runs it from the root.
/// - [`encode`](CodecLike::encode) maps a decoded value back to its wire form.
///
/// For codecs that do not coerce, `is(x) == decode(x).is_success()`.
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, CodecLike, Value};
///
/// let codec = Codec::string();
///
/// assert!(codec.is(&Value::from("hello")));
/// assert!(codec.decode(&Value::from(5)).is_failure());
/// assert_eq!(codec.name(), "string");
/// ```
pub trait CodecLike: Send + Sync {
    /// Human-readable type label used in failures and identity checks.
    fn name(&self) -> &str;

    fn tag(&self) -> CodecTag;

    fn is(&self, value: &Value) -> bool;

    /// Decodes `value`, which sits at `path` within the overall input.
    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors>;

    /// Maps a decoded value back to its wire representation.
    fn encode(&self, value: &Value) -> Value;

    /// Decodes `value` as the root of an input.
    fn decode(&self, value: &Value) -> Validation<Value, CodecErrors> {
        self.validate(value, &ValuePath::root())
    }

    /// The field partition, for codecs that validate objects field by field.
    fn shape(&self) -> Option<ObjectShape> {
        None
    }
}

/// Conversion into a shared [`CodecRef`].
///
/// Implemented for every concrete codec and for `CodecRef` itself, so
/// combinators accept either. Passing an existing `CodecRef` shares it rather
/// than wrapping it again.
pub trait IntoCodecRef {
    fn into_codec_ref(self) -> CodecRef;
}

impl<C: CodecLike + 'static> IntoCodecRef for C {
    fn into_codec_ref(self) -> CodecRef {
        Arc::new(self)
    }
}

impl IntoCodecRef for CodecRef {
    fn into_codec_ref(self) -> CodecRef {
        self
    }
}

impl IntoCodecRef for &CodecRef {
    fn into_codec_ref(self) -> CodecRef {
        Arc::clone(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(CodecTag::Date.to_string(), "DateType");
        assert_eq!(CodecTag::Union.to_string(), "UnionType");
        assert_eq!(CodecTag::RequiredOptional.to_string(), "RequiredOptionalType");
    }

    #[test]
    fn test_shape_merge_prefers_required() {
        let parent = ObjectShape {
            required: vec!["p".into()],
            optional: vec!["q".into()],
        };
        let child = ObjectShape {
            required: vec!["q".into(), "a".into()],
            optional: vec!["c".into(), "p".into()],
        };

        let merged = parent.merge(child);
        assert_eq!(merged.required, vec!["p", "q", "a"]);
        assert_eq!(merged.optional, vec!["c"]);
    }

    #[test]
    fn test_shape_declares() {
        let shape = ObjectShape {
            required: vec!["a".into()],
            optional: vec!["b".into()],
        };
        assert!(shape.declares("a"));
        assert!(shape.declares("b"));
        assert!(!shape.declares("c"));
    }
}
