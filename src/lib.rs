//! Hierarchical, module-scoped logging with runtime-configurable routing.
//!
//! Loggers are named by dotted module paths (`"app.db.pool"`). Routes map a
//! module pattern and a severity threshold to a named sink; every logger
//! keeps a precompiled per-level dispatch table that is rebuilt whenever a
//! route is added, so filtered calls cost one atomic load.
//!
//! ```ignore
//! use logroute::{LogContext, ROOT};
//!
//! let ctx = LogContext::new();
//! ctx.register_console_sink("console");
//! ctx.route(ROOT, "INFO", "console")?;
//!
//! let log = ctx.get_logger("app.db");
//! logroute::info!(log, "connected", { "pool": 8 });
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod level;
pub mod logger;
pub mod observability;
pub mod routing;
pub mod sink;

pub use config::{load_config, LoggingConfig};
pub use context::LogContext;
pub use error::{Error, Result, SinkError};
pub use level::Level;
pub use logger::{ErrorChain, LogValue, Logger, STACK_KEY};
pub use routing::{matches, DispatchTable, RouteInfo, ROOT, WILDCARD};
pub use sink::{
    AdHocSink, ConsoleSink, FileSink, Options, RecipientsSink, Record, Sink, TracingSink,
};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
