//! Named sink instances.
//!
//! # Responsibilities
//! - Store sinks by registration name
//! - Resolve names for routes and for `sinks()` lookups
//! - Forward option changes and release requests
//!
//! # Design Decisions
//! - Backed by `DashMap` so lookups never contend with route recompilation
//! - Unknown names always fail with `UnknownSink`; lookups never return a
//!   partial result

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::sink::{Options, Sink};

/// Registry of sinks keyed by instance name.
#[derive(Default)]
pub struct SinkRegistry {
    sinks: DashMap<String, Arc<dyn Sink>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `sink` under `name`, replacing any previous entry.
    ///
    /// The replaced sink is returned untouched; it is not released.
    pub fn insert(&self, name: &str, sink: Arc<dyn Sink>) -> Option<Arc<dyn Sink>> {
        self.sinks.insert(name.to_string(), sink)
    }

    /// Resolve a single name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Sink>> {
        self.sinks
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::UnknownSink(name.to_string()))
    }

    /// Resolve several names, failing on the first unknown one.
    pub fn get_many<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Arc<dyn Sink>>> {
        names.iter().map(|name| self.get(name.as_ref())).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sinks.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sinks.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn apply_config(&self, name: &str, options: &Options) -> Result<()> {
        let sink = self.get(name)?;
        sink.apply_config(options).map_err(|source| {
            tracing::warn!(sink = %name, error = %source, "Sink rejected options");
            Error::Sink {
                name: name.to_string(),
                source,
            }
        })
    }

    pub fn release(&self, name: &str) -> Result<()> {
        self.get(name)?.release();
        Ok(())
    }
}

impl std::fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkRegistry").field("sinks", &self.names()).finish()
    }
}
