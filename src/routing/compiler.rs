//! Dispatch table compilation.
//!
//! # Responsibilities
//! - Turn the route table into one sink-or-nothing slot per level for a
//!   given module name
//!
//! # Design Decisions
//! - Routes are scanned in registration order, not by specificity
//! - A matching route binds every slot at or above its severity threshold;
//!   slots below the threshold keep whatever an earlier route put there
//! - Last writer wins per slot
//! - The table's `level` is the threshold of the last matching route, not
//!   the most permissive one
//! - An empty slot is the no-op: emitting there touches nothing

use std::fmt;
use std::sync::Arc;

use crate::level::Level;
use crate::routing::matcher::matches;
use crate::routing::table::Route;
use crate::sink::Sink;

/// Per-logger dispatch table, indexed by [`Level::index`].
#[derive(Clone, Default)]
pub struct DispatchTable {
    slots: [Option<Arc<dyn Sink>>; Level::COUNT],
    level: Option<Level>,
}

impl DispatchTable {
    /// A table with every level disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Sink bound to `level`, if any.
    #[inline]
    pub fn slot(&self, level: Level) -> Option<&Arc<dyn Sink>> {
        self.slots[level.index()].as_ref()
    }

    #[inline]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.slots[level.index()].is_some()
    }

    /// Threshold of the last route that matched, `None` when nothing matched.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    fn bind(&mut self, route: &Route) {
        self.level = Some(route.threshold());
        for level in Level::ALL {
            if route.threshold().admits(level) {
                self.slots[level.index()] = Some(Arc::clone(route.sink()));
            }
        }
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let enabled: Vec<Level> = Level::ALL.into_iter().filter(|l| self.is_enabled(*l)).collect();
        f.debug_struct("DispatchTable")
            .field("level", &self.level)
            .field("enabled", &enabled)
            .finish()
    }
}

/// Compile the dispatch table of `module` against `routes`.
pub fn compile(module: &str, routes: &[Route]) -> DispatchTable {
    let mut table = DispatchTable::disabled();
    for route in routes.iter().filter(|r| matches(r.pattern(), module)) {
        table.bind(route);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::ROOT;
    use crate::sink::{AdHocSink, Record};

    fn sink() -> Arc<dyn Sink> {
        Arc::new(AdHocSink::new(|_: &Record<'_>| {}))
    }

    fn bound_to(table: &DispatchTable, level: Level, sink: &Arc<dyn Sink>) -> bool {
        table.slot(level).is_some_and(|s| Arc::ptr_eq(s, sink))
    }

    #[test]
    fn test_no_routes_disables_everything() {
        let table = compile("a.b", &[]);
        assert!(Level::ALL.iter().all(|l| !table.is_enabled(*l)));
        assert_eq!(table.level(), None);
    }

    #[test]
    fn test_threshold_enables_more_severe_levels() {
        let a = sink();
        let table = compile("a", &[Route::new(ROOT, Level::Info, "a", a.clone())]);

        for level in [Level::Fatal, Level::Error, Level::Warn, Level::Info] {
            assert!(bound_to(&table, level, &a), "{level} should be enabled");
        }
        for level in [Level::Debug, Level::Log, Level::Trace] {
            assert!(!table.is_enabled(level), "{level} should be disabled");
        }
        assert_eq!(table.level(), Some(Level::Info));
    }

    #[test]
    fn test_fatal_threshold_enables_only_fatal() {
        let table = compile("a", &[Route::new(ROOT, Level::Fatal, "a", sink())]);
        assert!(table.is_enabled(Level::Fatal));
        assert!(!table.is_enabled(Level::Error));
    }

    #[test]
    fn test_later_restrictive_route_overwrites_only_its_levels() {
        let a = sink();
        let b = sink();
        let routes = [
            Route::new("p", Level::Info, "a", a.clone()),
            Route::new("p", Level::Error, "b", b.clone()),
        ];
        let table = compile("p", &routes);

        assert!(bound_to(&table, Level::Fatal, &b));
        assert!(bound_to(&table, Level::Error, &b));
        assert!(bound_to(&table, Level::Warn, &a));
        assert!(bound_to(&table, Level::Info, &a));
        assert!(!table.is_enabled(Level::Debug));
        assert_eq!(table.level(), Some(Level::Error));
    }

    #[test]
    fn test_later_permissive_route_overwrites_everything() {
        let a = sink();
        let b = sink();
        let routes = [
            Route::new("p", Level::Info, "a", a.clone()),
            Route::new("p", Level::Trace, "b", b.clone()),
        ];
        let table = compile("p", &routes);

        assert!(Level::ALL.iter().all(|l| bound_to(&table, *l, &b)));
        assert_eq!(table.level(), Some(Level::Trace));
    }

    #[test]
    fn test_non_matching_routes_are_skipped() {
        let a = sink();
        let routes = [
            Route::new("other.*", Level::Trace, "x", sink()),
            Route::new("mylib.*", Level::Warn, "a", a.clone()),
        ];
        let table = compile("mylib.foo", &routes);

        assert!(bound_to(&table, Level::Warn, &a));
        assert!(!table.is_enabled(Level::Info));
        assert_eq!(table.level(), Some(Level::Warn));
    }

    #[test]
    fn test_level_follows_last_match_not_union() {
        let routes = [
            Route::new(ROOT, Level::Trace, "a", sink()),
            Route::new("m", Level::Warn, "b", sink()),
        ];
        let table = compile("m", &routes);

        assert_eq!(table.level(), Some(Level::Warn));
        assert!(table.is_enabled(Level::Trace));
    }
}
