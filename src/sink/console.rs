//! Console sink.
//!
//! Renders `<timestamp> <TAG> <module> <message><context>` per record, colored
//! by level unless switched to plain output. Colored output still follows
//! `colored`'s global control (`NO_COLOR`, `CLICOLOR_FORCE`, tty detection).
//!
//! Options:
//! - `plain` (bool): disable (`true`) or re-enable (`false`) ANSI colors
//! - `timestamps` (bool): include the timestamp column (default `true`)

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use colored::{ColoredString, Colorize};

use crate::error::SinkError;
use crate::level::Level;
use crate::sink::render::{context_suffix, message_text, module_column, timestamp};
use crate::sink::{bool_option, Options, Record, Sink};

fn paint(level: Level, text: &str) -> ColoredString {
    match level {
        Level::Fatal | Level::Error => text.bright_red(),
        Level::Warn => text.bright_yellow(),
        Level::Info => text.bright_cyan(),
        Level::Debug | Level::Log | Level::Trace => text.bright_white(),
    }
}

/// Writes human-readable lines to stdout or an injected writer.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    plain: AtomicBool,
    timestamps: AtomicBool,
}

impl ConsoleSink {
    /// Colored console sink on stdout.
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Console sink writing to `out` instead of stdout.
    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            plain: AtomicBool::new(false),
            timestamps: AtomicBool::new(true),
        }
    }

    /// Builder-style toggle for colorless output.
    pub fn plain(self, plain: bool) -> Self {
        self.plain.store(plain, Ordering::Relaxed);
        self
    }

    pub fn is_plain(&self) -> bool {
        self.plain.load(Ordering::Relaxed)
    }

    fn render(&self, record: &Record<'_>) -> String {
        let module = module_column(record.module);
        let body = format!("{}{}", message_text(record.message), context_suffix(record.context));
        let tag = record.level.prefix();
        let ts = if self.timestamps.load(Ordering::Relaxed) {
            Some(timestamp())
        } else {
            None
        };

        if self.is_plain() {
            match ts {
                Some(ts) => format!("{ts} {tag} {module} {body}"),
                None => format!("{tag} {module} {body}"),
            }
        } else {
            let head = match ts {
                Some(ts) => format!("{} ", ts.as_str().dimmed()),
                None => String::new(),
            };
            format!(
                "{head}{} {} {}",
                paint(record.level, tag),
                module.as_str().dimmed(),
                paint(record.level, &body)
            )
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, record: &Record<'_>) {
        let line = self.render(record);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{line}");
    }

    fn apply_config(&self, options: &Options) -> Result<(), SinkError> {
        let plain = bool_option(options, "plain")?;
        let timestamps = bool_option(options, "timestamps")?;

        if let Some(plain) = plain {
            self.plain.store(plain, Ordering::Relaxed);
        }
        if let Some(timestamps) = timestamps {
            self.timestamps.store(timestamps, Ordering::Relaxed);
        }
        Ok(())
    }

    fn release(&self) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LogContext;
    use crate::routing::ROOT;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn emit(sink: &ConsoleSink, level: Level, message: &str, context: Value) {
        let message = Value::from(message);
        sink.write(&Record { module: "mylib.foo", level, message: &message, context: &context });
    }

    #[test]
    fn test_plain_line() {
        let buf = Shared::default();
        let sink = ConsoleSink::with_writer(Box::new(buf.clone())).plain(true);
        let mut options = Options::new();
        options.insert("timestamps".into(), Value::Bool(false));
        sink.apply_config(&options).unwrap();

        emit(&sink, Level::Info, "hello", json!({}));
        assert_eq!(buf.text(), format!("INF {:<16} hello\n", "mylib.foo"));
    }

    #[test]
    fn test_colored_by_default() {
        colored::control::set_override(true);
        let buf = Shared::default();
        let sink = ConsoleSink::with_writer(Box::new(buf.clone()));
        emit(&sink, Level::Error, "boom", json!({"code": 3}));

        let text = buf.text();
        assert!(text.contains(&"ERR".bright_red().to_string()));
        assert!(text.contains("\"code\": 3"));
    }

    #[test]
    fn test_trace_record_prints_stack_below_context() {
        let buf = Shared::default();
        let sink = Arc::new(ConsoleSink::with_writer(Box::new(buf.clone())).plain(true));
        let mut options = Options::new();
        options.insert("timestamps".into(), Value::Bool(false));
        sink.apply_config(&options).unwrap();

        let ctx = LogContext::new();
        ctx.register_sink("console", Arc::clone(&sink));
        ctx.route(ROOT, "TRACE", "console").unwrap();
        ctx.get_logger("app.worker").trace("step", Some(&json!({"id": 7})));

        let text = buf.text();
        assert!(text.starts_with(&format!("TRC {:<16} step  {{", "app.worker")), "{text}");
        assert!(text.contains("\"__stack\": \"see below\""));
        assert!(text.contains("\"id\": 7"));
        assert!(text.contains("}\n\nBacktrace:\n"));
        assert!(text.contains("test_trace_record_prints_stack_below_context"));
    }

    #[test]
    fn test_plain_option_toggles_colors() {
        let sink = ConsoleSink::with_writer(Box::new(io::sink()));
        let mut options = Options::new();
        options.insert("plain".into(), Value::Bool(true));
        sink.apply_config(&options).unwrap();
        assert!(sink.is_plain());

        options.insert("plain".into(), Value::Bool(false));
        sink.apply_config(&options).unwrap();
        assert!(!sink.is_plain());
    }

    #[test]
    fn test_rejects_bad_option_type() {
        let sink = ConsoleSink::with_writer(Box::new(io::sink()));
        let mut options = Options::new();
        options.insert("plain".into(), Value::from("yes"));
        assert!(matches!(sink.apply_config(&options), Err(SinkError::InvalidOption { .. })));
    }
}
