//! Codec definitions.
//!
//! A codec is a named runtime type: it checks values with a non-coercing type
//! guard, decodes them while accumulating every failure, and encodes decoded
//! values back to their wire form.
//!
//! # Example
//!
//! ```rust
//! use codecs::{Codec, CodecLike, Value};
//! use serde_json::json;
//!
//! let codec = Codec::object()
//!     .field("title", Codec::string())
//!     .optional("due", Codec::date());
//!
//! let decoded = codec
//!     .decode(&Value::from(json!({"title": "ship", "due": "2024-01-01T00:00:00Z"})))
//!     .into_result()
//!     .unwrap();
//! assert!(decoded.get("due").unwrap().is_date());
//! ```

mod capability;
mod combinators;
mod date;
mod enumeration;
mod merge;
mod object;
mod primitive;
mod traits;

pub use capability::{Capability, CapabilityCodec, LoggerCapability};
pub use combinators::{nullable, optional, IntersectionCodec, UnionCodec};
pub use date::DateCodec;
pub use enumeration::{enum_codec, EnumCodec};
pub use merge::{extend_codec, extend_codec_required, required_optional_codec};
pub use object::{Fields, ObjectCodec};
pub use primitive::{PrimitiveCodec, PrimitiveKind};
pub use traits::{CodecLike, CodecRef, CodecTag, IntoCodecRef, ObjectShape};

use crate::value::Value;

/// Entry point for creating codecs.
///
/// Each factory method returns a concrete codec type so its builder methods
/// stay available; combinators accept any of them through [`IntoCodecRef`].
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, CodecLike, IntoCodecRef, Value};
///
/// let status = Codec::union(vec![
///     Codec::enumeration(["open", "closed"], "Status").into_codec_ref(),
///     Codec::null().into_codec_ref(),
/// ]);
///
/// assert!(status.is(&Value::from("open")));
/// assert!(status.is(&Value::Null));
/// assert!(!status.is(&Value::from("pending")));
/// ```
pub struct Codec;

impl Codec {
    pub fn string() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::String)
    }

    /// Accepts every number, including `NaN` and the infinities.
    pub fn number() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::Number)
    }

    pub fn boolean() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::Boolean)
    }

    pub fn null() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::Null)
    }

    pub fn undefined() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::Undefined)
    }

    /// Accepts any object, whatever its keys.
    pub fn unknown_record() -> PrimitiveCodec {
        PrimitiveCodec::new(PrimitiveKind::UnknownRecord)
    }

    /// Creates an empty object codec; add fields with
    /// [`field`](ObjectCodec::field) and [`optional`](ObjectCodec::optional).
    ///
    /// # Example
    ///
    /// ```rust
    /// use codecs::{Codec, CodecLike, Value};
    /// use serde_json::json;
    ///
    /// let codec = Codec::object()
    ///     .field("id", Codec::string())
    ///     .optional("note", Codec::string());
    ///
    /// assert_eq!(codec.name(), "({ id: string } & Partial<{ note: string }>)");
    /// assert!(codec.is(&Value::from(json!({"id": "1"}))));
    /// ```
    pub fn object() -> ObjectCodec {
        ObjectCodec::new()
    }

    /// An object codec with every field in `fields` required.
    pub fn interface(fields: Fields) -> ObjectCodec {
        ObjectCodec::interface(fields)
    }

    /// An object codec with every field in `fields` optional.
    pub fn partial(fields: Fields) -> ObjectCodec {
        ObjectCodec::partial(fields)
    }

    pub fn union(members: Vec<CodecRef>) -> UnionCodec {
        UnionCodec::new(members)
    }

    pub fn intersection(members: Vec<CodecRef>) -> IntersectionCodec {
        IntersectionCodec::new(members)
    }

    /// Dates, decoded from date values, epoch milliseconds or date strings.
    ///
    /// See [`DateCodec`].
    pub fn date() -> DateCodec {
        DateCodec::new()
    }

    /// Values exposing the six logging methods.
    ///
    /// ```rust
    /// use codecs::{tracing_logger, Codec, CodecLike};
    ///
    /// assert!(Codec::logger().is(&tracing_logger()));
    /// ```
    pub fn logger() -> CapabilityCodec {
        CapabilityCodec::of::<LoggerCapability>()
    }

    pub fn capability<I, S>(name: impl Into<String>, methods: I) -> CapabilityCodec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CapabilityCodec::new(name, methods)
    }

    pub fn nullable(codec: impl IntoCodecRef) -> UnionCodec {
        nullable(codec)
    }

    pub fn optional(codec: impl IntoCodecRef) -> UnionCodec {
        optional(codec)
    }

    /// Membership in `values`, by strict equality. See [`EnumCodec`].
    pub fn enumeration<I, V>(values: I, name: impl Into<String>) -> EnumCodec
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        enum_codec(values, name)
    }
}
