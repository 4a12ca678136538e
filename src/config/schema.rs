//! Configuration schema definitions.
//!
//! ```toml
//! [[sinks]]
//! name = "console"
//! type = "console"
//! plain = true
//!
//! [[sinks]]
//! name = "audit"
//! type = "file"
//! path = "/var/log/app/audit.log"
//!
//! [[routes]]
//! level = "INFO"
//! sink = "console"
//!
//! [[routes]]
//! pattern = "app.auth.*"
//! level = "TRACE"
//! sink = "audit"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::config::validation::validate_config;
use crate::context::LogContext;
use crate::error::Result;
use crate::routing::ROOT;
use crate::sink::ConsoleSink;

/// Root logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Sink instances to register.
    pub sinks: Vec<SinkConfig>,

    /// Routes to append, in order.
    pub routes: Vec<RouteConfig>,
}

/// One named sink instance.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SinkConfig {
    /// Registration name referenced by routes.
    pub name: String,

    #[serde(flatten)]
    pub kind: SinkKind,
}

/// Built-in sink kinds.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SinkKind {
    Console {
        /// Disable ANSI colors.
        #[serde(default)]
        plain: bool,
    },
    File {
        path: String,
    },
    Recipients {
        /// Names of sinks declared earlier (or already registered).
        members: Vec<String>,
    },
    Tracing,
}

/// A routing rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteConfig {
    /// Dotted module pattern; omitted means every module.
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Level name (FATAL, ERROR, WARN, INFO, DEBUG, LOG, TRACE).
    pub level: String,

    /// Sink name.
    pub sink: String,
}

fn default_pattern() -> String {
    ROOT.to_string()
}

impl LoggingConfig {
    /// Validate against `ctx`, then register sinks and append routes, both in
    /// declaration order.
    ///
    /// Nothing is applied when validation fails. A file that cannot be opened
    /// aborts the remaining steps; earlier registrations stay in place.
    pub fn apply(&self, ctx: &LogContext) -> Result<()> {
        validate_config(self, &ctx.sink_names()).map_err(ConfigError::Validation)?;

        for sink in &self.sinks {
            match &sink.kind {
                SinkKind::Console { plain } => {
                    ctx.register_sink(&sink.name, ConsoleSink::new().plain(*plain));
                }
                SinkKind::File { path } => {
                    ctx.register_file_sink(&sink.name, path)?;
                }
                SinkKind::Recipients { members } => {
                    ctx.register_recipients_sink(&sink.name, members.as_slice())?;
                }
                SinkKind::Tracing => {
                    ctx.register_tracing_sink(&sink.name);
                }
            }
        }

        for route in &self.routes {
            ctx.route(&route.pattern, &route.level, &route.sink)?;
        }

        tracing::info!(
            sinks = self.sinks.len(),
            routes = self.routes.len(),
            "Logging config applied"
        );
        Ok(())
    }
}
