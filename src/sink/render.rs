//! Line rendering shared by the console and file sinks.

use serde_json::Value;

use crate::logger::STACK_KEY;

const MODULE_WIDTH: usize = 16;
const ELLIPSIS: &str = "...";

/// UTC timestamp, e.g. `2024-05-01T09:12:03.042Z`.
pub(crate) fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Message text; strings are rendered without quotes.
pub(crate) fn message_text(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text appended after the message for a given context.
///
/// Objects are pretty-printed with the stack trace moved below the JSON.
pub(crate) fn context_suffix(context: &Value) -> String {
    match context {
        Value::Null => String::new(),
        Value::String(s) => format!(" {s}"),
        Value::Object(map) if map.is_empty() => String::new(),
        Value::Object(map) => {
            let mut shown = map.clone();
            let stack = shown
                .get_mut(STACK_KEY)
                .map(|slot| std::mem::replace(slot, Value::from("see below")));
            let mut out = format!(
                "  {}",
                serde_json::to_string_pretty(&Value::Object(shown)).unwrap_or_default()
            );
            if let Some(stack) = stack {
                out.push_str("\n\n");
                out.push_str(&message_text(&stack));
            }
            out
        }
        other => format!(" {other}"),
    }
}

/// Fixed-width module column: padded when short, tail-truncated when long.
pub(crate) fn module_column(module: &str) -> String {
    let len = module.chars().count();
    if len > MODULE_WIDTH {
        let keep = MODULE_WIDTH - ELLIPSIS.len();
        let tail: String = module.chars().skip(len - keep).collect();
        format!("{ELLIPSIS}{tail}")
    } else {
        format!("{module:<MODULE_WIDTH$}")
    }
}
