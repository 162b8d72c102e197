//! Enum membership codec.

use stillwater::Validation;

use crate::error::{CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::{Object, Value};

use super::traits::{CodecLike, CodecTag};

/// Validates membership in a closed set of values.
///
/// The name is whatever the caller supplies; it is never derived from the
/// values.
///
/// Membership is [`Value`] equality. Scalars compare by value, so `NaN` is
/// never a member and `1` matches `1.0`. Arrays, objects and dates compare
/// by content, so a structurally equal copy of an object member is accepted.
/// Functions compare by reference.
///
/// # Example
///
/// ```rust
/// use codecs::{enum_codec, CodecLike, Value};
///
/// let status = enum_codec(["active", "suspended"], "Status");
///
/// assert_eq!(status.name(), "Status");
/// assert!(status.is(&Value::from("active")));
/// assert!(!status.is(&Value::from("deleted")));
/// ```
#[derive(Debug, Clone)]
pub struct EnumCodec {
    name: String,
    values: Vec<Value>,
}

impl EnumCodec {
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Uses the values of an enum-like object as the member set. Keys are
    /// ignored.
    ///
    /// ```rust
    /// use codecs::{CodecLike, EnumCodec, Value};
    /// use serde_json::json;
    ///
    /// let object = Value::from(json!({"First": "first", "Second": "second"}));
    /// let codec = EnumCodec::from_object(object.as_object().unwrap(), "SomeEnum");
    ///
    /// assert!(codec.is(&Value::from("first")));
    /// assert!(!codec.is(&Value::from("First")));
    /// ```
    pub fn from_object(object: &Object, name: impl Into<String>) -> Self {
        Self::new(name, object.values().cloned())
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl CodecLike for EnumCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> CodecTag {
        CodecTag::Enum
    }

    fn is(&self, value: &Value) -> bool {
        self.values.contains(value)
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        if self.is(value) {
            return Validation::Success(value.clone());
        }

        Validation::Failure(CodecErrors::single(
            CodecError::new(path.clone(), format!("expected a value of {}", self.name))
                .with_code("invalid_enum")
                .with_got(value.to_string())
                .with_expected(&self.name)
                .within(&self.name),
        ))
    }

    fn encode(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Builds an [`EnumCodec`] accepting exactly `values`, named `name`.
pub fn enum_codec<I, V>(values: I, name: impl Into<String>) -> EnumCodec
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    EnumCodec::new(name, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_equality() {
        let codec = enum_codec([1, 2], "Level");

        assert!(codec.is(&Value::from(1)));
        assert!(codec.is(&Value::from(2.0)));
        assert!(!codec.is(&Value::from("1")));
        assert!(!codec.is(&Value::from(3)));
    }

    #[test]
    fn test_object_members_match_by_content() {
        let codec = enum_codec([Value::object([("code", 7)])], "Coded");

        assert!(codec.is(&Value::object([("code", 7)])));
        assert!(!codec.is(&Value::object([("code", 8)])));
        assert!(!codec.is(&Value::object([("code", 7), ("extra", 1)])));
    }

    #[test]
    fn test_nan_is_never_a_member() {
        let codec = enum_codec([f64::NAN], "Weird");
        assert!(!codec.is(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_single_failure_names_enum() {
        let codec = enum_codec(["a", "b"], "Letter");
        let errors = codec
            .validate(&Value::from("z"), &ValuePath::from_field("letter"))
            .into_result()
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        let error = errors.first();
        assert_eq!(error.code, "invalid_enum");
        assert_eq!(error.expected.as_deref(), Some("Letter"));
        assert_eq!(error.got.as_deref(), Some("z"));
        assert_eq!(error.path.to_string(), "letter");
    }

    #[test]
    fn test_decode_returns_input() {
        let codec = enum_codec(["a"], "Letter");
        let decoded = codec.decode(&Value::from("a")).into_result().unwrap();
        assert_eq!(decoded, Value::from("a"));
        assert_eq!(codec.encode(&decoded), decoded);
    }
}
