//! Date codec.
//!
//! [`DateCodec`] accepts date instances and decodes the two common wire forms
//! of a date, epoch milliseconds and date strings, into one. Its type guard
//! is strict: only genuine, valid [`Date`] values pass `is`.

use stillwater::Validation;

use crate::error::{CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::{Date, Value};

use super::traits::{CodecLike, CodecTag};

const NAME: &str = "Date";

/// Validates and decodes dates.
///
/// | input | `is` | `decode` |
/// | --- | --- | --- |
/// | valid `Date` | true | the same date |
/// | finite number | false | date at that many epoch milliseconds |
/// | parseable string | false | the parsed date |
/// | anything else | false | failure |
///
/// `encode` returns its input unchanged.
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, CodecLike, Date, Value};
///
/// let codec = Codec::date();
/// let date = Date::from_millis(1_600_000_000_000.0);
///
/// assert!(codec.is(&Value::Date(date)));
/// assert!(!codec.is(&Value::from(1_600_000_000_000i64)));
///
/// let from_millis = codec.decode(&Value::from(1_600_000_000_000i64)).into_result().unwrap();
/// let from_string = codec.decode(&Value::from("2020-09-13T12:26:40.000Z")).into_result().unwrap();
/// assert_eq!(from_millis, Value::Date(date));
/// assert_eq!(from_string, Value::Date(date));
///
/// assert!(codec.decode(&Value::from("soon")).is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCodec;

impl DateCodec {
    pub fn new() -> Self {
        Self
    }

    fn invalid_date(path: &ValuePath, got: String) -> Validation<Value, CodecErrors> {
        Validation::Failure(CodecErrors::single(
            CodecError::new(path.clone(), "invalid date")
                .with_code("invalid_date")
                .with_got(got)
                .with_expected(NAME)
                .within(NAME),
        ))
    }
}

impl CodecLike for DateCodec {
    fn name(&self) -> &str {
        NAME
    }

    fn tag(&self) -> CodecTag {
        CodecTag::Date
    }

    fn is(&self, value: &Value) -> bool {
        matches!(value, Value::Date(d) if d.is_valid())
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        match value {
            Value::Date(d) if d.is_valid() => Validation::Success(value.clone()),
            Value::Number(n) if n.is_finite() => match Date::from_millis(*n) {
                d if d.is_valid() => Validation::Success(Value::Date(d)),
                _ => Self::invalid_date(path, value.to_string()),
            },
            Value::String(s) => match Date::parse(s) {
                d if d.is_valid() => Validation::Success(Value::Date(d)),
                _ => Self::invalid_date(path, format!("{:?}", s)),
            },
            Value::Date(_) | Value::Number(_) => Self::invalid_date(path, value.to_string()),
            _ => Validation::Failure(CodecErrors::single(
                CodecError::new(path.clone(), "expected Date")
                    .with_code("invalid_type")
                    .with_got(value.type_name())
                    .with_expected(NAME)
                    .within(NAME),
            )),
        }
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
    fn test_invalid_date_instance_is_rejected() {
        let value = Value::Date(Date::invalid());
        assert!(!DateCodec.is(&value));

        let errors = unwrap_failure(DateCodec.decode(&value));
        assert_eq!(errors.first().code, "invalid_date");
        assert_eq!(errors.first().got.as_deref(), Some("Invalid Date"));
    }

    #[test]
    fn test_non_finite_numbers_fail() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e20] {
            let errors = unwrap_failure(DateCodec.decode(&Value::Number(n)));
            assert_eq!(errors.first().code, "invalid_date");
        }
    }

    #[test]
    fn test_wrong_kinds_fail_with_invalid_type() {
        for value in [
            Value::Bool(true),
            Value::Null,
            Value::Undefined,
            Value::object([("time", 0)]),
            Value::Array(vec![]),
        ] {
            let errors = unwrap_failure(DateCodec.decode(&value));
            assert_eq!(errors.first().code, "invalid_type");
            assert_eq!(errors.first().context, vec!["Date"]);
        }
    }

    #[test]
    fn test_unparseable_string_reports_input() {
        let errors = unwrap_failure(DateCodec.validate(&Value::from("abc"), &ValuePath::from_field("at")));
        let error = errors.first();
        assert_eq!(error.code, "invalid_date");
        assert_eq!(error.path.to_string(), "at");
        assert_eq!(error.got.as_deref(), Some("\"abc\""));
    }

    #[test]
    fn test_negative_millis() {
        let decoded = DateCodec.decode(&Value::from(-86_400_000)).into_result().unwrap();
        assert_eq!(
            decoded.as_date().and_then(Date::to_iso_string).as_deref(),
            Some("1969-12-31T00:00:00.000Z")
        );
    }
}
