//! Primitive codecs.
//!
//! This module provides [`PrimitiveCodec`] for the base value kinds:
//! strings, numbers, booleans, the `null` and `undefined` sentinels, and
//! arbitrary objects (`UnknownRecord`). Primitive codecs never coerce.

use stillwater::Validation;

use crate::error::{CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::{CodecLike, CodecTag};

/// The value kind a [`PrimitiveCodec`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    UnknownRecord,
}

impl PrimitiveKind {
    fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Null => "null",
            PrimitiveKind::Undefined => "undefined",
            PrimitiveKind::UnknownRecord => "UnknownRecord",
        }
    }

    fn tag(self) -> CodecTag {
        match self {
            PrimitiveKind::String => CodecTag::String,
            PrimitiveKind::Number => CodecTag::Number,
            PrimitiveKind::Boolean => CodecTag::Boolean,
            PrimitiveKind::Null => CodecTag::Null,
            PrimitiveKind::Undefined => CodecTag::Undefined,
            PrimitiveKind::UnknownRecord => CodecTag::UnknownRecord,
        }
    }

    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (PrimitiveKind::String, Value::String(_))
                | (PrimitiveKind::Number, Value::Number(_))
                | (PrimitiveKind::Boolean, Value::Bool(_))
                | (PrimitiveKind::Null, Value::Null)
                | (PrimitiveKind::Undefined, Value::Undefined)
                | (PrimitiveKind::UnknownRecord, Value::Object(_))
        )
    }
}

/// A codec accepting exactly one value kind.
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, CodecLike, Value};
///
/// let number = Codec::number();
/// assert!(number.is(&Value::from(1.5)));
///
/// let errors = number.decode(&Value::from("1.5")).into_result().unwrap_err();
/// assert_eq!(errors.first().code, "invalid_type");
/// assert_eq!(errors.first().got.as_deref(), Some("string"));
/// ```
#[derive(Debug, Clone)]
pub struct PrimitiveCodec {
    kind: PrimitiveKind,
    type_error_message: Option<String>,
}

impl PrimitiveCodec {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            type_error_message: None,
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Sets the message reported when the value has the wrong kind.
    ///
    /// ```rust
    /// use codecs::{Codec, CodecLike, Value};
    ///
    /// let codec = Codec::string().error("title must be text");
    /// let errors = codec.decode(&Value::Null).into_result().unwrap_err();
    /// assert_eq!(errors.first().message, "title must be text");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl CodecLike for PrimitiveCodec {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn tag(&self) -> CodecTag {
        self.kind.tag()
    }

    fn is(&self, value: &Value) -> bool {
        self.kind.accepts(value)
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        if self.kind.accepts(value) {
            return Validation::Success(value.clone());
        }

        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| format!("expected {}", self.kind.name()));
        Validation::Failure(CodecErrors::single(
            CodecError::new(path.clone(), message)
                .with_code("invalid_type")
                .with_got(value.type_name())
                .with_expected(self.kind.name())
                .within(self.kind.name()),
        ))
    }

    fn encode(&self, value: &Value) -> Value {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_each_kind_accepts_only_itself() {
        let samples = [
            (PrimitiveKind::String, Value::from("a")),
            (PrimitiveKind::Number, Value::from(1)),
            (PrimitiveKind::Boolean, Value::from(false)),
            (PrimitiveKind::Null, Value::Null),
            (PrimitiveKind::Undefined, Value::Undefined),
            (PrimitiveKind::UnknownRecord, Value::object([("k", 1)])),
        ];

        for (kind, _) in &samples {
            let codec = PrimitiveCodec::new(*kind);
            for (other, value) in &samples {
                assert_eq!(codec.is(value), kind == other, "{:?} on {:?}", kind, value);
                assert_eq!(codec.decode(value).is_success(), kind == other);
            }
        }
    }

    #[test]
    fn test_number_accepts_nan() {
        let codec = PrimitiveCodec::new(PrimitiveKind::Number);
        assert!(codec.is(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_unknown_record_rejects_arrays() {
        let codec = PrimitiveCodec::new(PrimitiveKind::UnknownRecord);
        assert!(!codec.is(&Value::Array(vec![])));
    }

    #[test]
    fn test_failure_details() {
        let codec = PrimitiveCodec::new(PrimitiveKind::Boolean);
        let path = ValuePath::from_field("enabled");

        let errors = unwrap_failure(codec.validate(&Value::from("yes"), &path));
        let error = errors.first();
        assert_eq!(error.path, path);
        assert_eq!(error.code, "invalid_type");
        assert_eq!(error.message, "expected boolean");
        assert_eq!(error.expected.as_deref(), Some("boolean"));
        assert_eq!(error.context, vec!["boolean"]);
    }

    #[test]
    fn test_names_and_tags() {
        let codec = PrimitiveCodec::new(PrimitiveKind::UnknownRecord);
        assert_eq!(codec.name(), "UnknownRecord");
        assert_eq!(codec.tag(), CodecTag::UnknownRecord);
    }
}
