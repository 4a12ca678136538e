//! Sink subsystem.
//!
//! # Data Flow
//! ```text
//! register_sink(name, sink | closure)
//!     → registry.rs (normalize closures into AdHocSink, store by name)
//!
//! route(pattern, level, name)
//!     → registry.rs (resolve name → Arc<dyn Sink>)
//!     → routing table keeps the Arc, not the name
//!
//! logger.info(..)
//!     → precompiled slot
//!     → Sink::write(&Record)
//!         - console.rs  (colored or plain lines on stdout)
//!         - file.rs     (plain lines appended to a file)
//!         - recipients.rs (fan-out to other sinks)
//!         - bridge.rs   (re-emit as tracing events)
//! ```
//!
//! # Design Decisions
//! - The registry owns sinks; routes hold shared references
//! - Re-registering a name replaces the entry without releasing the old sink
//! - `write` is infallible from the caller's side: sinks swallow their own
//!   I/O failures, the core is fire-and-forget

pub mod bridge;
pub mod console;
pub mod file;
pub mod recipients;
pub mod registry;
pub(crate) mod render;

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::SinkError;
use crate::level::Level;

pub use bridge::TracingSink;
pub use console::ConsoleSink;
pub use file::FileSink;
pub use recipients::RecipientsSink;
pub use registry::SinkRegistry;

/// Options mapping handed to [`Sink::apply_config`].
pub type Options = Map<String, Value>;

/// One log record as delivered to a sink.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Dotted module name of the emitting logger.
    pub module: &'a str,
    pub level: Level,
    pub message: &'a Value,
    /// Structured context; an empty object when the caller passed none.
    pub context: &'a Value,
}

/// An output destination for log records.
pub trait Sink: Send + Sync {
    /// Deliver one record. Must not block for long; failures stay inside the sink.
    fn write(&self, record: &Record<'_>);

    /// Reconfigure the sink at runtime.
    fn apply_config(&self, _options: &Options) -> Result<(), SinkError> {
        Ok(())
    }

    /// Release held resources (files, buffers).
    fn release(&self) {}
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn write(&self, record: &Record<'_>) {
        (**self).write(record)
    }

    fn apply_config(&self, options: &Options) -> Result<(), SinkError> {
        (**self).apply_config(options)
    }

    fn release(&self) {
        (**self).release()
    }
}

/// A sink built from a bare callback; lifecycle hooks are no-ops.
pub struct AdHocSink<F> {
    callback: F,
}

impl<F> AdHocSink<F>
where
    F: Fn(&Record<'_>) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> Sink for AdHocSink<F>
where
    F: Fn(&Record<'_>) + Send + Sync,
{
    fn write(&self, record: &Record<'_>) {
        (self.callback)(record)
    }
}

impl<F> fmt::Debug for AdHocSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdHocSink")
    }
}

/// Read an optional boolean option.
pub(crate) fn bool_option(options: &Options, key: &str) -> Result<Option<bool>, SinkError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(SinkError::invalid_option(key, "expected a boolean")),
    }
}

/// Read an optional string option.
pub(crate) fn str_option<'a>(options: &'a Options, key: &str) -> Result<Option<&'a str>, SinkError> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(SinkError::invalid_option(key, "expected a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_ad_hoc_sink_forwards_record() {
        let seen = Mutex::new(Vec::new());
        let sink = AdHocSink::new(|r: &Record<'_>| {
            seen.lock().unwrap().push((r.module.to_string(), r.level));
        });

        let msg = Value::from("hi");
        let ctx = Value::Object(Map::new());
        sink.write(&Record { module: "a.b", level: Level::Warn, message: &msg, context: &ctx });

        assert!(sink.apply_config(&Options::new()).is_ok());
        sink.release();
        assert_eq!(*seen.lock().unwrap(), vec![("a.b".to_string(), Level::Warn)]);
    }

    #[test]
    fn test_option_readers() {
        let mut options = Options::new();
        options.insert("plain".into(), Value::Bool(true));
        options.insert("filename".into(), Value::from(12));

        assert_eq!(bool_option(&options, "plain").unwrap(), Some(true));
        assert_eq!(bool_option(&options, "missing").unwrap(), None);
        assert!(str_option(&options, "filename").is_err());
    }
}
