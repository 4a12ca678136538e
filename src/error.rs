//! Error types.
//!
//! Configuration mistakes (bad level names, dangling sink names) are surfaced
//! synchronously at the call that detects them. Emission never fails: a
//! filtered record is a silent no-op.

use thiserror::Error;

use crate::config::loader::ConfigError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the configuration API.
#[derive(Debug, Error)]
pub enum Error {
    /// Severity name not in the `FATAL..TRACE` enumeration.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),

    /// Sink name referenced but not registered.
    #[error("unknown sink: {0}")]
    UnknownSink(String),

    /// A registered sink rejected an operation.
    #[error("sink '{name}' failed: {source}")]
    Sink {
        name: String,
        #[source]
        source: SinkError,
    },

    /// Declarative configuration could not be loaded or applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures reported by sink lifecycle hooks.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },
}

impl SinkError {
    pub(crate) fn invalid_option(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
