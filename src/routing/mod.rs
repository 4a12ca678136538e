//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! route(pattern, level, sink)
//!     → table.rs (append Route, registration order)
//!     → compiler.rs (recompile every tracked logger)
//!         for each route, in order:
//!             matcher.rs (does pattern select this module?)
//!             → bind slots at or above the threshold
//!     → DispatchTable swapped into the logger
//!
//! logger.warn(..)
//!     → DispatchTable slot for WARN
//!     → sink or no-op
//! ```
//!
//! # Design Decisions
//! - All filtering happens at compile time; emission is one indexed load
//! - Tables are rebuilt whole and swapped atomically, never patched in place
//! - Registration order decides overlaps, not pattern specificity

pub mod compiler;
pub mod matcher;
pub mod table;

pub use compiler::{compile, DispatchTable};
pub use matcher::{matches, ROOT, WILDCARD};
pub use table::{Route, RouteInfo, RouteTable};
