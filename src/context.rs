//! The logging configuration context.
//!
//! # Responsibilities
//! - Own the sink registry, the route table and the logger registry
//! - Hand out loggers compiled against the current routes
//! - Recompile every live logger whenever a route is added
//!
//! # Design Decisions
//! - One mutex guards route mutation, logger registration and
//!   recompilation; emission never takes it
//! - Loggers are tracked weakly; dropped ones are pruned on the next pass
//! - Registering a sink does not recompile: routes keep the instance they
//!   resolved when they were added

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::error::{Error, Result};
use crate::level::Level;
use crate::logger::{Logger, LoggerCore};
use crate::routing::{compile, Route, RouteInfo, RouteTable, ROOT};
use crate::sink::{
    AdHocSink, ConsoleSink, FileSink, Options, RecipientsSink, Record, Sink, SinkRegistry,
    TracingSink,
};

#[derive(Default)]
struct RoutingState {
    routes: RouteTable,
    loggers: Vec<Weak<LoggerCore>>,
}

impl RoutingState {
    /// Recompile every live logger and drop dead entries. Returns the live count.
    fn recompile_all(&mut self) -> usize {
        let RoutingState { routes, loggers } = self;
        loggers.retain(|weak| match weak.upgrade() {
            Some(core) => {
                core.install(compile(core.module(), routes.as_slice()));
                true
            }
            None => false,
        });
        tracing::trace!(loggers = loggers.len(), routes = routes.len(), "Loggers recompiled");
        loggers.len()
    }
}

#[derive(Default)]
struct Inner {
    sinks: SinkRegistry,
    state: Mutex<RoutingState>,
}

/// Process-scoped logging configuration.
///
/// Cloning is cheap; clones share the same registries.
#[derive(Clone, Default)]
pub struct LogContext {
    inner: Arc<Inner>,
}

impl LogContext {
    /// An empty context: no sinks, no routes, every logger disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with a `"console"` sink routed from `ROOT` at INFO.
    pub fn with_defaults() -> Self {
        let ctx = Self::new();
        let console = ctx.register_console_sink("console");
        ctx.push_route(Route::new(ROOT, Level::Info, "console", console));
        ctx
    }

    fn lock(&self) -> MutexGuard<'_, RoutingState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Loggers ---

    /// Create a logger for `module`, compiled against the current routes.
    ///
    /// Every call returns a new, independently tracked instance.
    pub fn get_logger(&self, module: &str) -> Logger {
        let mut state = self.lock();
        let core = Arc::new(LoggerCore::new(module, compile(module, state.routes.as_slice())));
        state.loggers.push(Arc::downgrade(&core));
        Logger::from_core(core)
    }

    /// Alias for [`get_logger`](Self::get_logger).
    pub fn local(&self, module: &str) -> Logger {
        self.get_logger(module)
    }

    /// Number of live loggers currently tracked.
    pub fn logger_count(&self) -> usize {
        self.lock()
            .loggers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    // --- Routes ---

    /// Route modules matching `pattern` at `level` (a level name) or more
    /// severe to the sink registered as `sink`.
    ///
    /// # Errors
    /// `InvalidLevel` for an unknown level name, `UnknownSink` for an
    /// unregistered sink. The route table is untouched on error.
    pub fn route(&self, pattern: &str, level: &str, sink: &str) -> Result<()> {
        let level: Level = level.parse()?;
        self.add_route(pattern, level, sink)
    }

    /// Typed form of [`route`](Self::route).
    pub fn add_route(&self, pattern: &str, level: Level, sink: &str) -> Result<()> {
        let instance = self.inner.sinks.get(sink)?;
        self.push_route(Route::new(pattern, level, sink, instance));
        Ok(())
    }

    fn push_route(&self, route: Route) {
        let info = route.info();
        let mut state = self.lock();
        state.routes.push(route);
        let loggers = state.recompile_all();
        tracing::debug!(
            pattern = %info.pattern,
            level = %info.level,
            sink = %info.sink,
            loggers,
            "Route added"
        );
    }

    /// Routes in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.lock().routes.snapshot()
    }

    // --- Sinks ---

    /// Register `sink` under `name`, silently replacing an existing entry.
    pub fn register_sink<S: Sink + 'static>(&self, name: &str, sink: S) {
        self.insert_sink(name, Arc::new(sink));
    }

    /// Register a bare callback as an ad-hoc sink.
    pub fn register_sink_fn<F>(&self, name: &str, callback: F)
    where
        F: Fn(&Record<'_>) + Send + Sync + 'static,
    {
        self.insert_sink(name, Arc::new(AdHocSink::new(callback)));
    }

    fn insert_sink(&self, name: &str, sink: Arc<dyn Sink>) {
        let replaced = self.inner.sinks.insert(name, sink).is_some();
        tracing::debug!(sink = %name, replaced, "Sink registered");
    }

    /// Resolve one sink by name.
    pub fn sink(&self, name: &str) -> Result<Arc<dyn Sink>> {
        self.inner.sinks.get(name)
    }

    /// Resolve several sinks; fails if any name is unknown.
    pub fn sinks<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn Sink>>> {
        self.inner.sinks.get_many(names)
    }

    /// Registered sink names, sorted.
    pub fn sink_names(&self) -> Vec<String> {
        self.inner.sinks.names()
    }

    pub fn has_sink(&self, name: &str) -> bool {
        self.inner.sinks.contains(name)
    }

    /// Forward `options` to the sink's `apply_config` hook.
    pub fn set_sink_options(&self, name: &str, options: &Options) -> Result<()> {
        self.inner.sinks.apply_config(name, options)
    }

    /// Call the sink's `release` hook. The sink stays registered.
    pub fn release_sink(&self, name: &str) -> Result<()> {
        self.inner.sinks.release(name)
    }

    // --- Built-in sink factories ---

    pub fn register_console_sink(&self, name: &str) -> Arc<ConsoleSink> {
        let sink = Arc::new(ConsoleSink::new());
        self.insert_sink(name, sink.clone());
        sink
    }

    pub fn register_file_sink(&self, name: &str, path: impl AsRef<Path>) -> Result<Arc<FileSink>> {
        let sink = FileSink::open(path).map_err(|source| Error::Sink {
            name: name.to_string(),
            source,
        })?;
        let sink = Arc::new(sink);
        self.insert_sink(name, sink.clone());
        Ok(sink)
    }

    /// Register a fan-out sink over already registered sinks.
    pub fn register_recipients_sink<S: AsRef<str>>(&self, name: &str, members: &[S]) -> Result<Arc<RecipientsSink>> {
        let members = self.sinks(members)?;
        Ok(self.register_recipients_sink_instances(name, members))
    }

    /// Register a fan-out sink over sink instances, registered or not.
    pub fn register_recipients_sink_instances(&self, name: &str, members: Vec<Arc<dyn Sink>>) -> Arc<RecipientsSink> {
        let sink = Arc::new(RecipientsSink::new(members));
        self.insert_sink(name, sink.clone());
        sink
    }

    pub fn register_tracing_sink(&self, name: &str) -> Arc<TracingSink> {
        let sink = Arc::new(TracingSink::new());
        self.insert_sink(name, sink.clone());
        sink
    }
}

impl std::fmt::Debug for LogContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogContext")
            .field("sinks", &self.sink_names())
            .field("routes", &self.routes())
            .field("loggers", &self.logger_count())
            .finish()
    }
}
