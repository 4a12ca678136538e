//! Loggers.
//!
//! # Data Flow
//! ```text
//! ctx.get_logger("mylib.foo")
//!     → compile dispatch table from current routes
//!     → register weakly in the context
//!
//! log.info(msg, ctx)
//!     → load dispatch table (lock-free)
//!     → INFO slot empty? return, nothing built
//!     → resolve msg/ctx (stack representation wins)
//!     → sink.write(Record)
//!
//! log.trace(msg, ctx)
//!     → as above, plus call stack under "__stack"
//! ```
//!
//! # Design Decisions
//! - A logger is a cheap handle; clones share one tracked instance
//! - The table is swapped whole by the context on every routing change, so
//!   handles never need re-acquiring
//! - Disabled levels return before any value is converted or allocated

mod backtrace;
pub mod macros;
pub mod value;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde_json::{Map, Value};

use crate::level::Level;
use crate::routing::DispatchTable;
use crate::sink::{Record, Sink};

pub use value::{ErrorChain, LogValue};

/// Context key holding the captured call stack of TRACE records.
pub const STACK_KEY: &str = "__stack";

/// Shared state of one `get_logger` instance.
pub(crate) struct LoggerCore {
    module: String,
    table: ArcSwap<DispatchTable>,
}

impl LoggerCore {
    pub(crate) fn new(module: &str, table: DispatchTable) -> Self {
        Self {
            module: module.to_string(),
            table: ArcSwap::from_pointee(table),
        }
    }

    pub(crate) fn module(&self) -> &str {
        &self.module
    }

    /// Replace the dispatch table in one atomic store.
    pub(crate) fn install(&self, table: DispatchTable) {
        self.table.store(Arc::new(table));
    }
}

macro_rules! level_methods {
    ($($(#[$attr:meta])* $name:ident => $level:expr;)*) => {
        $(
            $(#[$attr])*
            #[inline]
            pub fn $name(&self, message: impl LogValue, context: Option<&dyn LogValue>) {
                self.emit($level, message, context)
            }
        )*
    };
}

/// A named logger handle.
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
}

impl Logger {
    pub(crate) fn from_core(core: Arc<LoggerCore>) -> Self {
        Self { core }
    }

    /// Dotted module name this logger was created with.
    pub fn module(&self) -> &str {
        self.core.module()
    }

    /// Threshold of the last route that matched this logger.
    pub fn level(&self) -> Option<Level> {
        self.core.table.load().level()
    }

    /// Whether a record at `level` would reach a sink.
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.core.table.load().is_enabled(level)
    }

    /// Current dispatch table.
    pub fn dispatch_table(&self) -> Arc<DispatchTable> {
        self.core.table.load_full()
    }

    /// Emit at `level`. A missing context is delivered as an empty object.
    pub fn emit(&self, level: Level, message: impl LogValue, context: Option<&dyn LogValue>) {
        let table = self.core.table.load();
        let Some(sink) = table.slot(level) else {
            return;
        };
        let context = context.map_or_else(|| Value::Object(Map::new()), |c| c.resolve());
        self.deliver(sink, level, message.resolve(), context);
    }

    /// Emit at `level`, building the context only if the level is enabled.
    pub fn emit_with<C, F>(&self, level: Level, message: impl LogValue, context: F)
    where
        C: LogValue,
        F: FnOnce() -> C,
    {
        let table = self.core.table.load();
        let Some(sink) = table.slot(level) else {
            return;
        };
        let context = context().resolve();
        self.deliver(sink, level, message.resolve(), context);
    }

    #[inline(never)]
    fn deliver(&self, sink: &Arc<dyn Sink>, level: Level, message: Value, context: Value) {
        let context = if level == Level::Trace {
            with_stack(context, backtrace::capture())
        } else {
            context
        };
        sink.write(&Record {
            module: self.module(),
            level,
            message: &message,
            context: &context,
        });
    }

    level_methods! {
        fatal => Level::Fatal;
        error => Level::Error;
        warn => Level::Warn;
        info => Level::Info;
        debug => Level::Debug;
        /// The `LOG` level, between DEBUG and TRACE.
        log => Level::Log;
        /// Also attaches the caller's stack under [`STACK_KEY`].
        trace => Level::Trace;
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("module", &self.module())
            .field("table", &*self.core.table.load())
            .finish()
    }
}

/// Put `stack` under [`STACK_KEY`]; non-object contexts are wrapped.
fn with_stack(context: Value, stack: String) -> Value {
    match context {
        Value::Object(mut map) => {
            map.insert(STACK_KEY.to_string(), Value::String(stack));
            Value::Object(map)
        }
        Value::Null => {
            let mut map = Map::new();
            map.insert(STACK_KEY.to_string(), Value::String(stack));
            Value::Object(map)
        }
        other => {
            let mut map = Map::new();
            map.insert("context".to_string(), other);
            map.insert(STACK_KEY.to_string(), Value::String(stack));
            Value::Object(map)
        }
    }
}
