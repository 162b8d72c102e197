//! Callable values.

use std::fmt;
use std::sync::Arc;

use super::Value;

type Callable = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A shared callable stored inside a [`Value`].
///
/// Functions compare by identity: two `Function`s are equal only when they
/// point at the same closure.
///
/// # Example
///
/// ```rust
/// use codecs::{Function, Value};
///
/// let double = Function::new(|args| match args.first() {
///     Some(Value::Number(n)) => Value::Number(n * 2.0),
///     _ => Value::Undefined,
/// });
///
/// assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
/// assert_eq!(double, double.clone());
/// ```
#[derive(Clone)]
pub struct Function(Callable);

impl Function {
    /// Wraps a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wraps a closure that returns nothing, like a `void` method.
    pub fn procedure<F>(f: F) -> Self
    where
        F: Fn(&[Value]) + Send + Sync + 'static,
    {
        Self::new(move |args| {
            f(args);
            Value::Undefined
        })
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[Function]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_identity_equality() {
        let a = Function::new(|_| Value::Null);
        let b = Function::new(|_| Value::Null);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_procedure_returns_undefined() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let f = Function::procedure(move |args| {
            counter.fetch_add(args.len(), Ordering::SeqCst);
        });

        assert_eq!(f.call(&[Value::Null, Value::Null]), Value::Undefined);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
