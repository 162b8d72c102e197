//! Capability codecs.
//!
//! A capability is a fixed set of named methods. [`CapabilityCodec`] checks
//! that a value exposes a callable under every one of those names, without
//! caring how the value was built: any object with the right members
//! qualifies.

use stillwater::Validation;

use crate::error::{CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::{CodecLike, CodecTag};

/// A named set of methods a value must expose.
///
/// # Example
///
/// ```rust
/// use codecs::{Capability, CapabilityCodec, CodecLike, Function, Value};
///
/// struct Closeable;
///
/// impl Capability for Closeable {
///     const NAME: &'static str = "Closeable";
///     const METHODS: &'static [&'static str] = &["close"];
/// }
///
/// let codec = CapabilityCodec::of::<Closeable>();
/// let handle = Value::object([("close", Function::procedure(|_| {}))]);
///
/// assert!(codec.is(&handle));
/// assert!(!codec.is(&Value::object([("close", true)])));
/// ```
pub trait Capability {
    const NAME: &'static str;
    const METHODS: &'static [&'static str];
}

/// The logging capability: `error`, `warn`, `info`, `log`, `debug`, `trace`.
///
/// See [`crate::logger`] for the matching Rust trait and adapters.
#[derive(Debug, Clone, Copy)]
pub struct LoggerCapability;

impl Capability for LoggerCapability {
    const NAME: &'static str = "Logger";
    const METHODS: &'static [&'static str] = &["error", "warn", "info", "log", "debug", "trace"];
}

/// Validates that a value is an object whose required members are all
/// functions.
///
/// Arity and return values are not checked. Decoding never coerces: a
/// successful decode returns the input unchanged, and a failed one reports
/// each missing or non-callable member at its own path.
#[derive(Debug, Clone)]
pub struct CapabilityCodec {
    name: String,
    methods: Vec<String>,
}

impl CapabilityCodec {
    pub fn new<I, S>(name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// The codec for a [`Capability`].
    pub fn of<C: Capability>() -> Self {
        Self::new(C::NAME, C::METHODS.iter().copied())
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }
}

impl CodecLike for CapabilityCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> CodecTag {
        CodecTag::Capability
    }

    fn is(&self, value: &Value) -> bool {
        let Value::Object(obj) = value else {
            return false;
        };
        self.methods
            .iter()
            .all(|method| matches!(obj.get(method), Some(Value::Function(_))))
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        let Value::Object(obj) = value else {
            return Validation::Failure(CodecErrors::single(
                CodecError::new(path.clone(), format!("expected {}", self.name))
                    .with_code("invalid_type")
                    .with_got(value.type_name())
                    .with_expected("object")
                    .within(&self.name),
            ));
        };

        let errors: Vec<CodecError> = self
            .methods
            .iter()
            .filter_map(|method| {
                let member_path = path.push_field(method);
                match obj.get(method) {
                    Some(Value::Function(_)) => None,
                    None => Some(
                        CodecError::new(member_path, format!("missing method '{}'", method))
                            .with_code("missing_method")
                            .with_expected("function"),
                    ),
                    Some(other) => Some(
                        CodecError::new(member_path, format!("'{}' is not callable", method))
                            .with_code("not_callable")
                            .with_got(other.type_name())
                            .with_expected("function"),
                    ),
                }
            })
            .collect();

        if errors.is_empty() {
            Validation::Success(value.clone())
        } else {
            Validation::Failure(CodecErrors::from_vec(errors).within(&self.name))
        }
    }

    fn encode(&self, value: &Value) -> Value {
        value.clone()
    }
}
