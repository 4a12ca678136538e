//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use logroute::{Record, Sink};
use serde_json::Value;

/// One delivered record: (module, level number, message, context).
pub type Captured = (String, u8, Value, Value);

/// Sink that records every write.
#[derive(Default)]
pub struct CaptureSink {
    records: Mutex<Vec<Captured>>,
}

impl CaptureSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<Captured> {
        self.records.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|(_, _, message, _)| message.as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl Sink for CaptureSink {
    fn write(&self, record: &Record<'_>) {
        self.records.lock().unwrap().push((
            record.module.to_string(),
            record.level.as_u8(),
            record.message.clone(),
            record.context.clone(),
        ));
    }
}
