//! Object codecs.
//!
//! This module provides [`Fields`], a field-name-to-codec mapping, and
//! [`ObjectCodec`], which validates an object against a required field group
//! and an optional field group. Keys not named by either group are passed
//! through untouched: object codecs describe an open shape.

use std::fmt;

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{BuildError, CodecError, CodecErrors};
use crate::path::ValuePath;
use crate::value::{Object, Value};

use super::traits::{CodecLike, CodecRef, CodecTag, IntoCodecRef, ObjectShape};

/// A mapping from field name to the codec for that field's value.
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, Fields};
///
/// let fields = Fields::new()
///     .with("id", Codec::string())
///     .with("count", Codec::number());
///
/// assert_eq!(fields.len(), 2);
/// assert!(fields.contains("id"));
/// ```
#[derive(Clone, Default)]
pub struct Fields(IndexMap<String, CodecRef>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any previous codec under the same name.
    pub fn with(mut self, name: impl Into<String>, codec: impl IntoCodecRef) -> Self {
        self.insert(name, codec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, codec: impl IntoCodecRef) -> Option<CodecRef> {
        self.0.insert(name.into(), codec.into_codec_ref())
    }

    pub fn get(&self, name: &str) -> Option<&CodecRef> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CodecRef)> {
        self.0.iter().map(|(name, codec)| (name.as_str(), codec))
    }

    fn shift_remove(&mut self, name: &str) -> Option<CodecRef> {
        self.0.shift_remove(name)
    }

    /// Renders the mapping as `{ a: string, b: number }`.
    fn describe(&self) -> String {
        if self.0.is_empty() {
            return "{}".to_string();
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(name, codec)| format!("{}: {}", name, codec.name()))
            .collect();
        format!("{{ {} }}", parts.join(", "))
    }
}

impl<K, C> FromIterator<(K, C)> for Fields
where
    K: Into<String>,
    C: IntoCodecRef,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, codec) in iter {
            fields.insert(name, codec);
        }
        fields
    }
}

impl fmt::Debug for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(name, codec)| (name, codec.name())))
            .finish()
    }
}

/// A codec for objects with required and optional fields.
///
/// - Every required field must be present and pass its codec. A missing
///   required field reads as `undefined`, so it only fails when its codec
///   rejects `undefined`.
/// - Every optional field may be absent or `undefined`; when present it must
///   pass its codec.
/// - Other keys are neither validated nor removed.
///
/// All field failures are accumulated.
///
/// # Example
///
/// ```rust
/// use codecs::{Codec, CodecLike, Value};
/// use serde_json::json;
///
/// let codec = Codec::object()
///     .field("name", Codec::string())
///     .optional("age", Codec::number())
///     .named("Person");
///
/// assert!(codec.is(&Value::from(json!({"name": "Ada"}))));
/// assert!(codec.is(&Value::from(json!({"name": "Ada", "age": 36, "extra": true}))));
/// assert!(!codec.is(&Value::from(json!({"age": 36}))));
/// ```
pub struct ObjectCodec {
    name: String,
    named: bool,
    required: Fields,
    optional: Fields,
    type_error_message: Option<String>,
}

impl ObjectCodec {
    /// An object codec with no fields; accepts any object.
    pub fn new() -> Self {
        Self::from_parts(Fields::new(), Fields::new())
    }

    /// An object codec whose fields are all required.
    pub fn interface(required: Fields) -> Self {
        Self::from_parts(required, Fields::new())
    }

    /// An object codec whose fields are all optional.
    pub fn partial(optional: Fields) -> Self {
        Self::from_parts(Fields::new(), optional)
    }

    /// An object codec from disjoint required and optional groups.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateField`] if a name appears in both groups.
    pub fn try_new(
        name: impl Into<String>,
        required: Fields,
        optional: Fields,
    ) -> Result<Self, BuildError> {
        let name = name.into();
        if let Some(field) = required.names().find(|field| optional.contains(field)) {
            return Err(BuildError::DuplicateField {
                field: field.to_string(),
                codec: name,
            });
        }
        Ok(Self::from_parts(required, optional).named(name))
    }

    fn from_parts(required: Fields, optional: Fields) -> Self {
        let mut codec = Self {
            name: String::new(),
            named: false,
            required,
            optional,
            type_error_message: None,
        };
        codec.refresh_name();
        codec
    }

    /// Adds a required field. A previous optional field of the same name is
    /// replaced.
    pub fn field(mut self, name: impl Into<String>, codec: impl IntoCodecRef) -> Self {
        let name = name.into();
        self.optional.shift_remove(&name);
        self.required.insert(name, codec);
        self.refresh_name();
        self
    }

    /// Adds an optional field. A previous required field of the same name is
    /// replaced.
    pub fn optional(mut self, name: impl Into<String>, codec: impl IntoCodecRef) -> Self {
        let name = name.into();
        self.required.shift_remove(&name);
        self.optional.insert(name, codec);
        self.refresh_name();
        self
    }

    /// Sets the codec name. Without one, the name is derived from the fields,
    /// e.g. `{ a: string }` or `Partial<{ c: number }>`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self.named = true;
        self
    }

    /// Sets the message reported when the value is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    pub fn required_fields(&self) -> &Fields {
        &self.required
    }

    pub fn optional_fields(&self) -> &Fields {
        &self.optional
    }

    fn refresh_name(&mut self) {
        if self.named {
            return;
        }
        self.name = match (self.required.is_empty(), self.optional.is_empty()) {
            (_, true) => self.required.describe(),
            (true, false) => format!("Partial<{}>", self.optional.describe()),
            (false, false) => format!(
                "({} & Partial<{}>)",
                self.required.describe(),
                self.optional.describe()
            ),
        };
    }

    fn validate_present(
        codec: &CodecRef,
        key: &str,
        value: &Value,
        path: &ValuePath,
        decoded: &mut Object,
        errors: &mut Vec<CodecError>,
    ) {
        match codec.validate(value, path) {
            Validation::Success(v) => {
                decoded.insert(key.to_string(), v);
            }
            Validation::Failure(e) => errors.extend(e),
        }
    }
}

impl Default for ObjectCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecLike for ObjectCodec {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> CodecTag {
        match (self.required.is_empty(), self.optional.is_empty()) {
            (_, true) => CodecTag::Interface,
            (true, false) => CodecTag::Partial,
            (false, false) => CodecTag::RequiredOptional,
        }
    }

    fn is(&self, value: &Value) -> bool {
        let Value::Object(obj) = value else {
            return false;
        };

        self.required
            .iter()
            .all(|(key, codec)| codec.is(obj.get(key).unwrap_or(&Value::Undefined)))
            && self.optional.iter().all(|(key, codec)| match obj.get(key) {
                None | Some(Value::Undefined) => true,
                Some(v) => codec.is(v),
            })
    }

    fn validate(&self, value: &Value, path: &ValuePath) -> Validation<Value, CodecErrors> {
        let obj = match value {
            Value::Object(o) => o,
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected object".to_string());
                return Validation::Failure(CodecErrors::single(
                    CodecError::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_got(value.type_name())
                        .with_expected("object")
                        .within(&self.name),
                ));
            }
        };

        let mut errors = Vec::new();
        let mut decoded = obj.clone();

        for (key, codec) in self.required.iter() {
            let field_path = path.push_field(key);
            match obj.get(key) {
                Some(field_value) => Self::validate_present(
                    codec,
                    key,
                    field_value,
                    &field_path,
                    &mut decoded,
                    &mut errors,
                ),
                None if codec.validate(&Value::Undefined, &field_path).is_success() => {}
                None => errors.push(
                    CodecError::new(field_path, format!("required field '{}' is missing", key))
                        .with_code("required")
                        .with_expected(codec.name())
                        .within(codec.name()),
                ),
            }
        }

        for (key, codec) in self.optional.iter() {
            match obj.get(key) {
                None | Some(Value::Undefined) => {}
                Some(field_value) => Self::validate_present(
                    codec,
                    key,
                    field_value,
                    &path.push_field(key),
                    &mut decoded,
                    &mut errors,
                ),
            }
        }

        if errors.is_empty() {
            Validation::Success(Value::Object(decoded))
        } else {
            Validation::Failure(CodecErrors::from_vec(errors).within(&self.name))
        }
    }

    fn encode(&self, value: &Value) -> Value {
        let Value::Object(obj) = value else {
            return value.clone();
        };

        let mut encoded = obj.clone();
        for (key, codec) in self.required.iter().chain(self.optional.iter()) {
            if let Some(field_value) = obj.get(key) {
                encoded.insert(key.to_string(), codec.encode(field_value));
            }
        }
        Value::Object(encoded)
    }

    fn shape(&self) -> Option<ObjectShape> {
        Some(ObjectShape {
            required: self.required.names().map(str::to_string).collect(),
            optional: self.optional.names().map(str::to_string).collect(),
        })
    }
}
