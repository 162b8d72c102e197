use codecs::{nullable, optional, Codec, CodecLike, CodecTag, Date, Value};
use serde_json::json;

fn unwrap_success<T, E: std::fmt::Debug>(v: stillwater::Validation<T, E>) -> T {
    v.into_result().unwrap()
}

#[test]
fn test_nullable_accepts_null_not_undefined() {
    let codec = nullable(Codec::string());

    assert!(codec.is(&Value::Null));
    assert!(codec.is(&Value::from("x")));
    assert!(!codec.is(&Value::Undefined));
    assert!(!codec.is(&Value::from(5)));
    assert_eq!(codec.tag(), CodecTag::Union);
}

#[test]
fn test_optional_accepts_undefined_not_null() {
    let codec = optional(Codec::string());

    assert!(codec.is(&Value::Undefined));
    assert!(codec.is(&Value::from("x")));
    assert!(!codec.is(&Value::Null));
}

#[test]
fn test_sentinels_decode_to_themselves() {
    assert_eq!(
        unwrap_success(nullable(Codec::date()).decode(&Value::Null)),
        Value::Null
    );
    assert_eq!(
        unwrap_success(optional(Codec::date()).decode(&Value::Undefined)),
        Value::Undefined
    );
}

#[test]
fn test_nested_wrappers_accept_all_three() {
    let codec = nullable(optional(Codec::date()));

    assert!(codec.is(&Value::Null));
    assert!(codec.is(&Value::Undefined));
    assert!(codec.is(&Value::Date(Date::from_millis(0.0))));

    let decoded = unwrap_success(codec.decode(&Value::from(86_400_000)));
    assert_eq!(decoded, Value::Date(Date::from_millis(86_400_000.0)));
}

#[test]
fn test_encode_dispatches_to_inner() {
    let codec = nullable(Codec::date());
    let date = Value::Date(Date::from_millis(42.0));

    assert_eq!(codec.encode(&Value::Null), Value::Null);
    assert_eq!(codec.encode(&date), date);
}

#[test]
fn test_factory_wrappers() {
    assert_eq!(Codec::nullable(Codec::number()).name(), "(number | null)");
    assert_eq!(Codec::optional(Codec::number()).name(), "(number | undefined)");
}

#[test]
fn test_wrapped_fields_in_objects() {
    let codec = Codec::object()
        .field("deleted_at", nullable(Codec::date()))
        .field("note", optional(Codec::string()));

    // null present, undefined-accepting field absent
    assert!(codec.is(&Value::from(json!({"deleted_at": null}))));

    // a nullable field still has to be present
    let errors = codec
        .decode(&Value::from(json!({"note": "hi"})))
        .into_result()
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().code, "required");
    assert_eq!(errors.first().path.to_string(), "deleted_at");
}
