//! Values accepted as log messages and contexts.
//!
//! A value may expose a stack representation; when it does, that text is
//! logged in place of the raw value. This is how caught errors are passed
//! straight to a logger.

use std::error::Error as StdError;
use std::fmt::Write as _;

use serde_json::{Map, Value};

/// Something that can be logged as a message or context.
pub trait LogValue {
    /// Structured form of the value.
    fn to_value(&self) -> Value;

    /// Stack (trace) representation, logged instead of `to_value` when present.
    fn stack(&self) -> Option<String> {
        None
    }

    /// The value actually handed to sinks.
    fn resolve(&self) -> Value {
        match self.stack() {
            Some(stack) => Value::String(stack),
            None => self.to_value(),
        }
    }
}

impl<T: LogValue + ?Sized> LogValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn stack(&self) -> Option<String> {
        (**self).stack()
    }
}

impl LogValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl LogValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl LogValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl LogValue for Map<String, Value> {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

/// Wraps an error so its cause chain is logged as its stack representation.
///
/// ```text
/// connection refused
/// caused by: os error 111
/// ```
pub struct ErrorChain<'a>(pub &'a (dyn StdError + 'a));

impl<'a> ErrorChain<'a> {
    pub fn new(error: &'a (dyn StdError + 'a)) -> Self {
        Self(error)
    }
}

impl LogValue for ErrorChain<'_> {
    fn to_value(&self) -> Value {
        Value::String(self.0.to_string())
    }

    fn stack(&self) -> Option<String> {
        let mut out = self.0.to_string();
        let mut source = self.0.source();
        while let Some(cause) = source {
            let _ = write!(out, "\ncaused by: {cause}");
            source = cause.source();
        }
        Some(out)
    }
}
