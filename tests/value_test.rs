//! Integration tests for the dynamic value model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use codecs::{Date, Function, Value};
use serde_json::json;

#[test]
fn test_from_json() {
    let value = Value::from(json!({
        "name": "Ada",
        "age": 36,
        "tags": ["math", "engines"],
        "spouse": null
    }));

    assert_eq!(value.get("name"), Some(&Value::from("Ada")));
    assert_eq!(value.get("age").and_then(Value::as_f64), Some(36.0));
    assert_eq!(
        value.get("tags"),
        Some(&Value::Array(vec![Value::from("math"), Value::from("engines")]))
    );
    assert!(value.get("spouse").unwrap().is_null());
    assert_eq!(value.get("missing"), None);
}

#[test]
fn test_option_conversion() {
    assert_eq!(Value::from(None::<bool>), Value::Undefined);
    assert_eq!(Value::from(Some(true)), Value::Bool(true));
}

#[test]
fn test_display() {
    assert_eq!(Value::from(3).to_string(), "3");
    assert_eq!(Value::from(2.5).to_string(), "2.5");
    assert_eq!(Value::from(json!([1, "a"])).to_string(), "1,a");
    assert_eq!(Value::from(json!({})).to_string(), "[object Object]");
    assert_eq!(Value::Date(Date::from_millis(0.0)).to_string(), "1970-01-01T00:00:00.000Z");
    assert_eq!(Value::Date(Date::invalid()).to_string(), "Invalid Date");
}

#[test]
fn test_call_method() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let value = Value::object([
        (
            "bump",
            Value::function(move |args| {
                counter.fetch_add(args.len(), Ordering::SeqCst);
                Value::from("bumped")
            }),
        ),
        ("label", Value::from("counter")),
    ]);

    assert_eq!(
        value.call_method("bump", &[Value::Null, Value::Null]),
        Some(Value::from("bumped"))
    );
    assert_eq!(value.call_method("label", &[]), None);
    assert_eq!(value.call_method("absent", &[]), None);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_function_equality_is_by_reference() {
    let f = Function::procedure(|_| {});
    let g = Function::procedure(|_| {});

    assert_eq!(Value::Function(f.clone()), Value::Function(f));
    assert_ne!(
        Value::Function(Function::procedure(|_| {})),
        Value::Function(g)
    );
}
