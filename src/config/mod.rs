//! Declarative logging configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggingConfig (validated)
//!     → apply(&LogContext)
//!         → register sinks, in declaration order
//!         → append routes, in declaration order
//! ```
//!
//! # Design Decisions
//! - Loaded once at start-up; runtime changes go through the context API
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks and reports
//!   every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggingConfig, RouteConfig, SinkConfig, SinkKind};
pub use validation::{validate_config, ValidationError};
