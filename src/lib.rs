//! # Codecs
//!
//! Runtime codecs for validating, decoding and encoding untyped data.
//!
//! ## Overview
//!
//! A codec is a named runtime type. Given an arbitrary [`Value`] it can
//! check conformance ([`CodecLike::is`]), decode into a validated value while
//! collecting every failure ([`CodecLike::decode`]), and encode a decoded value
//! back into its wire form ([`CodecLike::encode`]).
//!
//! On top of a small base layer of primitive, object, union and intersection
//! codecs, the crate provides combinators for recurring shapes:
//!
//! - [`DateCodec`]: dates from date values, epoch milliseconds or strings
//! - [`CapabilityCodec`]: duck-typed interfaces such as the `Logger`
//! - [`nullable`] and [`optional`]: widening with `null` / `undefined`
//! - [`enum_codec`]: membership in a closed set of values
//! - [`required_optional_codec`] and [`extend_codec`]: object codecs with
//!   required and optional fields, and codec inheritance
//!
//! Failures accumulate through stillwater's `Validation` type, so a decode
//! reports every bad field at once.
//!
//! ## Example
//!
//! ```rust
//! use codecs::{
//!     enum_codec, extend_codec, nullable, required_optional_codec, Codec, CodecLike, Fields,
//!     IntoCodecRef, Value,
//! };
//! use serde_json::json;
//!
//! let entity = required_optional_codec(
//!     Fields::new().with("id", Codec::string()),
//!     Fields::new().with("updated", Codec::date()),
//!     "Entity",
//! )
//! .unwrap()
//! .into_codec_ref();
//!
//! let task = extend_codec(
//!     &entity,
//!     Fields::new()
//!         .with("status", enum_codec(["open", "done"], "Status"))
//!         .with("due", nullable(Codec::date())),
//!     Fields::new(),
//!     "Task",
//! )
//! .unwrap();
//!
//! let input = Value::from(json!({
//!     "id": "t-1",
//!     "status": "open",
//!     "due": "2024-06-01T09:00:00Z"
//! }));
//! let decoded = task.decode(&input).into_result().unwrap();
//! assert!(decoded.get("due").unwrap().is_date());
//!
//! let errors = task
//!     .decode(&Value::from(json!({"status": "late", "due": null})))
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod codec;
pub mod error;
pub mod logger;
pub mod path;
pub mod validation;
pub mod value;

pub use codec::{
    enum_codec, extend_codec, extend_codec_required, nullable, optional, required_optional_codec,
    Capability, CapabilityCodec, Codec, CodecLike, CodecRef, CodecTag, DateCodec, EnumCodec,
    Fields, IntersectionCodec, IntoCodecRef, LoggerCapability, ObjectCodec, ObjectShape,
    PrimitiveCodec, PrimitiveKind, UnionCodec,
};
pub use error::{BuildError, CodecError, CodecErrors};
pub use logger::{logger_value, tracing_logger, Logger, TracingLogger, ValueLogger};
pub use path::{PathSegment, ValuePath};
pub use validation::{assert_type, DecodeResult};
pub use value::{Date, Function, Object, Value};
