//! Dynamic values for runtime validation.
//!
//! Codecs validate data whose shape is not known at compile time. [`Value`] is
//! that unknown input: JSON-like data extended with the two sentinels
//! `undefined` and `null`, date instances and callable members. Payloads that
//! arrive as `serde_json::Value` convert losslessly with `Value::from`.

mod date;
mod function;

use std::fmt::{self, Display};

use indexmap::IndexMap;

pub use date::{Date, MAX_EPOCH_MILLIS};
pub use function::Function;

/// Property map of an object value. Keys keep insertion order.
pub type Object = IndexMap<String, Value>;

/// An unknown value under validation.
///
/// # Example
///
/// ```rust
/// use codecs::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"name": "Alice", "tags": ["a", "b"]}));
///
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// assert_eq!(value.get("missing"), None);
/// assert_eq!(value.type_name(), "object");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Undefined,
    /// The explicit empty value.
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(Date),
    Array(Vec<Value>),
    Object(Object),
    Function(Function),
}

impl Value {
    /// Builds an object value from key/value pairs.
    ///
    /// ```rust
    /// use codecs::{Date, Value};
    ///
    /// let value = Value::object([
    ///     ("id", Value::from(7)),
    ///     ("created", Value::Date(Date::from_millis(0.0))),
    /// ]);
    /// assert!(value.is_object());
    /// ```
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Wraps a closure as a function value.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(Function::new(f))
    }

    /// Returns the type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Looks up a property of an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Calls the function stored under `method`.
    ///
    /// Returns `None` when the value is not an object or the member is not
    /// callable.
    pub fn call_method(&self, method: &str, args: &[Value]) -> Option<Value> {
        match self.get(method) {
            Some(Value::Function(f)) => Some(f.call(args)),
            _ => None,
        }
    }
}

/// Writes a number the way JavaScript's `String(n)` does.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let scientific = format!("{:e}", n);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, exponent)
            }
            _ => f.write_str(&scientific),
        };
    }
    write!(f, "{}", n)
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Function(_) => f.write_str("[Function]"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Value::Date(d)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Value>();
    assert_sync::<Value>();
};
