//! Route storage.
//!
//! # Responsibilities
//! - Hold routes in registration order
//! - Expose a read-only snapshot for introspection
//!
//! # Design Decisions
//! - Append-only: never reordered, never deduplicated
//! - Each route keeps the sink instance resolved at registration time, so a
//!   later re-registration of the same name does not affect it

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::level::Level;
use crate::sink::Sink;

/// A routing rule: modules matching `pattern` send records at `threshold`
/// or more severe to `sink`.
#[derive(Clone)]
pub struct Route {
    pattern: String,
    threshold: Level,
    sink_name: String,
    sink: Arc<dyn Sink>,
}

impl Route {
    pub fn new(pattern: impl Into<String>, threshold: Level, sink_name: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self {
            pattern: pattern.into(),
            threshold,
            sink_name: sink_name.into(),
            sink,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn sink_name(&self) -> &str {
        &self.sink_name
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn info(&self) -> RouteInfo {
        RouteInfo {
            pattern: self.pattern.clone(),
            level: self.threshold,
            sink: self.sink_name.clone(),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("threshold", &self.threshold)
            .field("sink", &self.sink_name)
            .finish()
    }
}

/// Snapshot of one route, for introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    pub pattern: String,
    pub level: Level,
    pub sink: String,
}

/// Ordered list of routes.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn snapshot(&self) -> Vec<RouteInfo> {
        self.routes.iter().map(Route::info).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::ROOT;
    use crate::sink::{AdHocSink, Record};

    fn noop() -> Arc<dyn Sink> {
        Arc::new(AdHocSink::new(|_: &Record<'_>| {}))
    }

    #[test]
    fn test_keeps_registration_order_and_duplicates() {
        let mut table = RouteTable::new();
        table.push(Route::new(ROOT, Level::Info, "console", noop()));
        table.push(Route::new("a.*", Level::Trace, "file", noop()));
        table.push(Route::new(ROOT, Level::Info, "console", noop()));

        let snapshot = table.snapshot();
        assert_eq!(table.len(), 3);
        assert_eq!(snapshot[0].pattern, ROOT);
        assert_eq!(snapshot[1].level, Level::Trace);
        assert_eq!(snapshot[0], snapshot[2]);
    }
}
