//! Bridging decodes into `Result`.
//!
//! Codecs report through [`stillwater::Validation`] so that every failure is
//! accumulated. Call sites that want `?` propagation convert with
//! [`assert_type`].

use stillwater::Validation;

use crate::codec::CodecLike;
use crate::error::CodecErrors;
use crate::value::Value;

/// Type alias for decode results.
pub type DecodeResult<T = Value> = Validation<T, CodecErrors>;

/// Decodes `value` with `codec`, returning the decoded value or every failure.
///
/// # Example
///
/// ```rust
/// use codecs::{assert_type, Codec, CodecErrors, Value};
///
/// fn parse_due(raw: &Value) -> Result<Value, CodecErrors> {
///     let due = assert_type(&Codec::date(), raw)?;
///     Ok(due)
/// }
///
/// assert!(parse_due(&Value::from("2024-02-29")).is_ok());
/// assert!(parse_due(&Value::from("2024-02-30")).is_err());
/// ```
pub fn assert_type<C: CodecLike + ?Sized>(codec: &C, value: &Value) -> Result<Value, CodecErrors> {
    codec.decode(value).into_result()
}
