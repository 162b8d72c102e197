//! Structural merge combinators.
//!
//! [`required_optional_codec`] assembles an object codec from a required and
//! an optional field group. [`extend_codec`] derives a child codec from a
//! parent: the child accepts exactly the values that satisfy the parent and
//! the child's additional fields.
//!
//! # Example
//!
//! ```rust
//! use codecs::{
//!     extend_codec, required_optional_codec, Codec, CodecLike, Fields, IntoCodecRef, Value,
//! };
//! use serde_json::json;
//!
//! let entity = required_optional_codec(
//!     Fields::new().with("id", Codec::string()),
//!     Fields::new().with("created", Codec::date()),
//!     "Entity",
//! )
//! .unwrap()
//! .into_codec_ref();
//!
//! let user = extend_codec(
//!     &entity,
//!     Fields::new().with("email", Codec::string()),
//!     Fields::new().with("nickname", Codec::string()),
//!     "User",
//! )
//! .unwrap();
//!
//! assert_eq!(user.name(), "User");
//! assert!(user.is(&Value::from(json!({"id": "u1", "email": "a@b.c"}))));
//! assert!(!user.is(&Value::from(json!({"email": "a@b.c"}))));
//! ```

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::BuildError;

use super::combinators::IntersectionCodec;
use super::object::{Fields, ObjectCodec};
use super::traits::{CodecLike, CodecRef, IntoCodecRef};

/// Builds an object codec from disjoint required and optional field groups.
///
/// The codec accepts objects in which every required field is present and
/// valid and every optional field is absent, `undefined` or valid. Other keys
/// are ignored. With no optional fields the result is a plain required-field
/// codec.
///
/// # Errors
///
/// Returns [`BuildError::DuplicateField`] if a field appears in both groups.
pub fn required_optional_codec(
    required: Fields,
    optional: Fields,
    name: impl Into<String>,
) -> Result<ObjectCodec, BuildError> {
    let codec = ObjectCodec::try_new(name, required, optional)?;
    debug!(
        codec = codec.name(),
        required = codec.required_fields().len(),
        optional = codec.optional_fields().len(),
        "built required/optional codec"
    );
    Ok(codec)
}

/// Derives a child codec from `parent` with additional required and optional
/// fields.
///
/// The child validates as the conjunction of `parent` and
/// `required_optional_codec(required, optional, name)`, and is named `name`.
/// Failures keep the codec-name context of the layer that raised them, so a
/// parent field failure carries `[name, parent, ...]` while a child field
/// failure carries `[name, name, ...]`.
///
/// When both groups are empty, `parent` itself is returned: the result is the
/// same `Arc`, and `name` is ignored.
///
/// # Errors
///
/// - [`BuildError::DuplicateField`] if a field appears in both groups.
/// - [`BuildError::ConflictingField`] if the parent already declares one of the
///   additional fields.
pub fn extend_codec(
    parent: &CodecRef,
    required: Fields,
    optional: Fields,
    name: impl Into<String>,
) -> Result<CodecRef, BuildError> {
    if required.is_empty() && optional.is_empty() {
        trace!(parent = parent.name(), "no additional fields, reusing parent codec");
        return Ok(Arc::clone(parent));
    }

    let name = name.into();
    let layer = required_optional_codec(required, optional, name.clone())?;

    if let Some(shape) = parent.shape() {
        let fields = layer
            .required_fields()
            .names()
            .chain(layer.optional_fields().names());
        for field in fields {
            if shape.declares(field) {
                return Err(BuildError::ConflictingField {
                    field: field.to_string(),
                    codec: name,
                    parent: parent.name().to_string(),
                });
            }
        }
    }

    debug!(codec = %name, parent = parent.name(), "extended codec");
    Ok(IntersectionCodec::new(vec![Arc::clone(parent), layer.into_codec_ref()])
        .named(name)
        .into_codec_ref())
}

/// [`extend_codec`] with no optional fields.
pub fn extend_codec_required(
    parent: &CodecRef,
    required: Fields,
    name: impl Into<String>,
) -> Result<CodecRef, BuildError> {
    extend_codec(parent, required, Fields::new(), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Codec, CodecTag};
    use crate::value::Value;
    use serde_json::json;

    fn parent() -> CodecRef {
        Codec::object().field("p", Codec::string()).named("Parent").into_codec_ref()
    }

    #[test]
    fn test_identity_shortcut_returns_same_arc() {
        let parent = parent();
        let child = extend_codec(&parent, Fields::new(), Fields::new(), "Child").unwrap();

        assert!(Arc::ptr_eq(&parent, &child));
        assert_eq!(child.name(), "Parent");
    }

    #[test]
    fn test_identity_shortcut_skips_conflict_checks() {
        let parent: CodecRef = Arc::new(Codec::string());
        let child = extend_codec_required(&parent, Fields::new(), "Child").unwrap();
        assert!(Arc::ptr_eq(&parent, &child));
    }

    #[test]
    fn test_equivalent_parents_are_not_conflated() {
        let a = parent();
        let b = parent();
        let child = extend_codec(&a, Fields::new(), Fields::new(), "Child").unwrap();

        assert!(Arc::ptr_eq(&a, &child));
        assert!(!Arc::ptr_eq(&b, &child));
    }

    #[test]
    fn test_child_is_intersection() {
        let child = extend_codec_required(
            &parent(),
            Fields::new().with("a", Codec::string()),
            "Child",
        )
        .unwrap();

        assert_eq!(child.tag(), CodecTag::Intersection);
        let shape = child.shape().unwrap();
        assert_eq!(shape.required, vec!["p", "a"]);
    }

    #[test]
    fn test_conflicting_required_field() {
        let result = extend_codec_required(
            &parent(),
            Fields::new().with("p", Codec::number()),
            "Child",
        );

        assert_eq!(
            result.err(),
            Some(BuildError::ConflictingField {
                field: "p".into(),
                codec: "Child".into(),
                parent: "Parent".into(),
            })
        );
    }

    #[test]
    fn test_conflicting_optional_field() {
        let result = extend_codec(
            &parent(),
            Fields::new(),
            Fields::new().with("p", Codec::string()),
            "Child",
        );
        assert!(matches!(result, Err(BuildError::ConflictingField { .. })));
    }

    #[test]
    fn test_duplicate_field_in_layer() {
        let result = extend_codec(
            &parent(),
            Fields::new().with("a", Codec::string()),
            Fields::new().with("a", Codec::string()),
            "Child",
        );
        assert!(matches!(result, Err(BuildError::DuplicateField { .. })));
    }

    #[test]
    fn test_parent_without_shape_is_not_checked() {
        let parent: CodecRef = Arc::new(Codec::unknown_record());
        let child = extend_codec_required(
            &parent,
            Fields::new().with("a", Codec::string()),
            "Child",
        )
        .unwrap();

        assert!(child.is(&Value::from(json!({"a": "x"}))));
    }

    #[test]
    fn test_grandchild_conflicts_with_grandparent() {
        let child = extend_codec_required(
            &parent(),
            Fields::new().with("a", Codec::string()),
            "Child",
        )
        .unwrap();

        let result = extend_codec_required(
            &child,
            Fields::new().with("p", Codec::string()),
            "Grandchild",
        );
        assert!(matches!(
            result,
            Err(BuildError::ConflictingField { ref parent, .. }) if parent == "Child"
        ));
    }

    #[test]
    fn test_required_optional_without_optional_is_interface() {
        let codec = required_optional_codec(
            Fields::new().with("a", Codec::string()),
            Fields::new(),
            "OnlyRequired",
        )
        .unwrap();

        assert_eq!(codec.tag(), CodecTag::Interface);
        assert_eq!(codec.name(), "OnlyRequired");
    }
}
