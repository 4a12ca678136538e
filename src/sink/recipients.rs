//! Fan-out sink.

use std::sync::Arc;

use crate::sink::{Record, Sink};

/// Forwards every record to each member, in order.
pub struct RecipientsSink {
    members: Vec<Arc<dyn Sink>>,
}

impl RecipientsSink {
    pub fn new(members: Vec<Arc<dyn Sink>>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Sink for RecipientsSink {
    fn write(&self, record: &Record<'_>) {
        for member in &self.members {
            member.write(record);
        }
    }
}
