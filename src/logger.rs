//! The logging capability as a Rust trait.
//!
//! [`Codec::logger`](crate::Codec::logger) checks dynamic values for the six
//! logging methods. This module connects that capability with static Rust
//! code in both directions:
//!
//! - [`logger_value`] exposes any [`Logger`] implementation as a value that
//!   passes the codec.
//! - [`ValueLogger`] wraps a value that passed the codec so Rust code can log
//!   through it.
//!
//! [`TracingLogger`] is the default implementation, forwarding to `tracing`.
//!
//! # Example
//!
//! ```rust
//! use codecs::{tracing_logger, Codec, CodecLike, Logger, ValueLogger, Value};
//!
//! let value = tracing_logger();
//! assert!(Codec::logger().is(&value));
//!
//! let logger = ValueLogger::decode(&value).unwrap();
//! logger.info(&[Value::from("service started")]);
//! ```

use std::sync::Arc;

use crate::codec::{Capability, Codec, LoggerCapability};
use crate::error::CodecErrors;
use crate::validation::assert_type;
use crate::value::{Function, Object, Value};

/// A sink for log messages at six severities.
///
/// Arguments are dynamic values, so an implementation decides how to render
/// them. `log` is an alias for the default severity.
pub trait Logger: Send + Sync {
    fn error(&self, args: &[Value]);
    fn warn(&self, args: &[Value]);
    fn info(&self, args: &[Value]);
    fn log(&self, args: &[Value]);
    fn debug(&self, args: &[Value]);
    fn trace(&self, args: &[Value]);
}

/// Exposes `logger` as an object value with one callable member per logging
/// method.
///
/// The result always passes [`Codec::logger`].
pub fn logger_value(logger: Arc<dyn Logger>) -> Value {
    let members: Object = LoggerCapability::METHODS
        .iter()
        .map(|&method| {
            let logger = Arc::clone(&logger);
            let function = Function::procedure(move |args| dispatch(logger.as_ref(), method, args));
            (method.to_string(), Value::Function(function))
        })
        .collect();
    Value::Object(members)
}

fn dispatch(logger: &dyn Logger, method: &str, args: &[Value]) {
    match method {
        "error" => logger.error(args),
        "warn" => logger.warn(args),
        "info" => logger.info(args),
        "log" => logger.log(args),
        "debug" => logger.debug(args),
        _ => logger.trace(args),
    }
}

/// Renders log arguments the way a console does: space separated.
fn render(args: &[Value]) -> String {
    args.iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A [`Logger`] that emits `tracing` events. `log` maps to `INFO`.
///
/// Events go to whatever subscriber the application installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn error(&self, args: &[Value]) {
        tracing::error!("{}", render(args));
    }

    fn warn(&self, args: &[Value]) {
        tracing::warn!("{}", render(args));
    }

    fn info(&self, args: &[Value]) {
        tracing::info!("{}", render(args));
    }

    fn log(&self, args: &[Value]) {
        tracing::info!("{}", render(args));
    }

    fn debug(&self, args: &[Value]) {
        tracing::debug!("{}", render(args));
    }

    fn trace(&self, args: &[Value]) {
        tracing::trace!("{}", render(args));
    }
}

/// [`TracingLogger`] as a value.
pub fn tracing_logger() -> Value {
    logger_value(Arc::new(TracingLogger))
}

/// A dynamic value known to satisfy the logging capability.
///
/// Only obtainable through [`ValueLogger::decode`], so every method call lands
/// on a function.
#[derive(Debug, Clone)]
pub struct ValueLogger(Value);

impl ValueLogger {
    /// Checks `value` against [`Codec::logger`].
    ///
    /// # Errors
    ///
    /// Returns the codec failures if a logging method is missing or not
    /// callable.
    pub fn decode(value: &Value) -> Result<Self, CodecErrors> {
        assert_type(&Codec::logger(), value).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn call(&self, method: &str, args: &[Value]) {
        // return values of logging methods are ignored
        let _ = self.0.call_method(method, args);
    }
}

impl Logger for ValueLogger {
    fn error(&self, args: &[Value]) {
        self.call("error", args);
    }

    fn warn(&self, args: &[Value]) {
        self.call("warn", args);
    }

    fn info(&self, args: &[Value]) {
        self.call("info", args);
    }

    fn log(&self, args: &[Value]) {
        self.call("log", args);
    }

    fn debug(&self, args: &[Value]) {
        self.call("debug", args);
    }

    fn trace(&self, args: &[Value]) {
        self.call("trace", args);
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValueLogger>();
    assert_sync::<ValueLogger>();
    assert_send::<TracingLogger>();
    assert_sync::<TracingLogger>();
};
