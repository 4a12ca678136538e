//! Internal diagnostics.
//!
//! # Data Flow
//! ```text
//! context / registry / config
//!     → tracing events (sink registered, route added, recompiled)
//! TracingSink
//!     → tracing events, target "logroute"
//!
//! init_tracing
//!     → registry + EnvFilter + fmt layer (stderr)
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber on its own
//! - `RUST_LOG` wins over the default filter

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber filtered by `RUST_LOG`, or by
/// `default_filter` when the variable is unset or invalid.
///
/// # Errors
/// Fails if a global subscriber has already been set.
pub fn init_tracing(default_filter: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
