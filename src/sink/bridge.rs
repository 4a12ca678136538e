//! Sink that re-emits records as `tracing` events.
//!
//! FATAL and ERROR map to `error`, DEBUG and LOG to `debug`; the original
//! level name is kept in the `level` field.

use crate::level::Level;
use crate::sink::render::{context_suffix, message_text};
use crate::sink::{Record, Sink};

/// Bridges routed records into the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn write(&self, record: &Record<'_>) {
        let module = record.module;
        let level = record.level.as_str();
        let message = message_text(record.message);
        let context = context_suffix(record.context);
        let context = context.trim_start();

        match record.level {
            Level::Fatal | Level::Error => {
                tracing::error!(target: "logroute", module, level, context, "{message}")
            }
            Level::Warn => tracing::warn!(target: "logroute", module, level, context, "{message}"),
            Level::Info => tracing::info!(target: "logroute", module, level, context, "{message}"),
            Level::Debug | Level::Log => {
                tracing::debug!(target: "logroute", module, level, context, "{message}")
            }
            Level::Trace => tracing::trace!(target: "logroute", module, level, context, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_forwards_to_subscriber() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        let msg = json!("disk almost full");
        let ctx = json!({"free_mb": 12});
        tracing::subscriber::with_default(subscriber, || {
            TracingSink::new().write(&Record { module: "store.disk", level: Level::Fatal, message: &msg, context: &ctx });
        });

        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("ERROR"));
        assert!(out.contains("disk almost full"));
        assert!(out.contains("module=\"store.disk\""));
        assert!(out.contains("level=\"FATAL\""));
    }

    #[test]
    fn test_write_without_subscriber_is_noop() {
        let msg = json!("quiet");
        let ctx = json!({"k": 1});
        for level in Level::ALL {
            TracingSink::new().write(&Record { module: "m", level, message: &msg, context: &ctx });
        }
    }
}
