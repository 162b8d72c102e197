//! Codec combinators.
//!
//! - [`UnionCodec`]: at least one member must accept the value
//! - [`IntersectionCodec`]: every member must accept the value
//! - [`nullable`] / [`optional`]: widen a codec with `null` / `undefined`
//!
//! # Example
//!
//! ```rust
//! use codecs::{nullable, optional, Codec, CodecLike, Value};
//!
//! let maybe_name = nullable(optional(Codec::string()));
//!
//! assert!(maybe_name.is(&Value::from("Ada")));
//! assert!(maybe_name.is(&Value::Null));
//! assert!(maybe_name.is(&Value::Undefined));
//! assert!(!maybe_name.is(&Value::from(3)));
//! assert_eq!(maybe_name.name(), "((string | undefined) | null)");
//! ```

use stillwater::Validation;

use crate::error::{CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::Value;

use super::primitive::{PrimitiveCodec, PrimitiveKind};
use super::traits::{CodecLike, CodecRef, CodecTag, IntoCodecRef, ObjectShape};

/// A codec accepting values accepted by any of its members.
///
/// Members are tried in order and the first successful decode wins. When no
/// member accepts the value, the failures of every member are reported.
pub struct UnionCodec {
    name: String,
    members: Vec<CodecRef>,
}

impl UnionCodec {
    /// Builds a union named `(A | B | ...)`.
    pub fn new(members: Vec<CodecRef>) -> Self {
        let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
        Self {
            name: format!("({})", names.join(" | ")),
            members,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn members(&self) -> &[CodecRef] {
        &self.members
    }
}

impl CodecLike for UnionCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> CodecTag {
        CodecTag::Union
    }

    fn is(&self, value: &Value) -> bool {
        self.members.iter().any(|m| m.is(value))
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        let mut errors = Vec::new();

        for member in &self.members {
            match member.validate(value, path) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            errors.push(
                CodecError::new(path.clone(), "union has no members")
                    .with_code("no_union_member")
                    .with_got(value.type_name()),
            );
        }
        Validation::Failure(CodecErrors::from_vec(errors).within(&self.name))
    }

    /// Encodes with the first member whose type guard accepts the value.
    fn encode(&self, value: &Value) -> Value {
        self.members
            .iter()
            .find(|m| m.is(value))
            .map_or_else(|| value.clone(), |m| m.encode(value))
    }
}

/// A codec accepting values accepted by all of its members.
///
/// Every member validates the same input and all failures are accumulated.
/// On success the members' outputs are merged over the input: for objects,
/// each field a member decoded to something new replaces the input field.
pub struct IntersectionCodec {
    name: String,
    members: Vec<CodecRef>,
}

impl IntersectionCodec {
    /// Builds an intersection named `(A & B & ...)`.
    pub fn new(members: Vec<CodecRef>) -> Self {
        let names: Vec<&str> = members.iter().map(|m| m.name()).collect();
        Self {
            name: format!("({})", names.join(" & ")),
            members,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn members(&self) -> &[CodecRef] {
        &self.members
    }
}

impl CodecLike for IntersectionCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> CodecTag {
        CodecTag::Intersection
    }

    fn is(&self, value: &Value) -> bool {
        self.members.iter().all(|m| m.is(value))
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        let mut errors = Vec::new();
        let mut outputs = Vec::with_capacity(self.members.len());

        for member in &self.members {
            match member.validate(value, path) {
                Validation::Success(v) => outputs.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(merge_outputs(value, outputs))
        } else {
            Validation::Failure(CodecErrors::from_vec(errors).within(&self.name))
        }
    }

    fn encode(&self, value: &Value) -> Value {
        let outputs = self.members.iter().map(|m| m.encode(value)).collect();
        merge_outputs(value, outputs)
    }

    fn shape(&self) -> Option<ObjectShape> {
        self.members
            .iter()
            .filter_map(|m| m.shape())
            .reduce(ObjectShape::merge)
    }
}

/// Overlays what each member changed onto the input.
fn merge_outputs(input: &Value, outputs: Vec<Value>) -> Value {
    match input {
        Value::Object(base) => {
            let mut merged = base.clone();
            for output in outputs {
                let Value::Object(fields) = output else {
                    continue;
                };
                for (key, v) in fields {
                    if base.get(&key) != Some(&v) {
                        merged.insert(key, v);
                    }
                }
            }
            Value::Object(merged)
        }
        _ => outputs
            .into_iter()
            .rev()
            .find(|output| output != input)
            .unwrap_or_else(|| input.clone()),
    }
}

/// Widens `codec` to also accept `null`.
///
/// `null` decodes and encodes to itself; every other value is handled by
/// `codec`.
pub fn nullable(codec: impl IntoCodecRef) -> UnionCodec {
    UnionCodec::new(vec![
        codec.into_codec_ref(),
        PrimitiveCodec::new(PrimitiveKind::Null).into_codec_ref(),
    ])
}

/// Widens `codec` to also accept `undefined`.
///
/// `undefined` decodes and encodes to itself; every other value is handled by
/// `codec`.
pub fn optional(codec: impl IntoCodecRef) -> UnionCodec {
    UnionCodec::new(vec![
        codec.into_codec_ref(),
        PrimitiveCodec::new(PrimitiveKind::Undefined).into_codec_ref(),
    ])
}
