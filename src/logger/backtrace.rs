//! Call-stack capture for TRACE records.
//!
//! Leading symbols that belong to the capture path (std's backtrace
//! machinery and the logger's own emission methods) are dropped, so the
//! rendered stack starts at the caller. Trimming works per symbol rather
//! than per frame, because inlining merges frames differently across
//! build profiles.

use std::backtrace::{Backtrace, BacktraceStatus};

/// Symbol prefixes of the capture path.
const INTERNAL_PREFIXES: &[&str] = &[
    "std::backtrace",
    "logroute::logger::backtrace::capture",
    "logroute::logger::Logger::",
    "<logroute::logger::Logger>::",
];

/// Capture the current call stack as `Backtrace:\n<frames>`, starting at the
/// first frame outside the logger.
#[inline(never)]
pub(crate) fn capture() -> String {
    let backtrace = Backtrace::force_capture();
    if backtrace.status() != BacktraceStatus::Captured {
        return "Backtrace:\n<unavailable>".to_string();
    }
    render(&backtrace.to_string())
}

fn render(text: &str) -> String {
    let entries = split_symbols(text);
    let kept: Vec<&str> = entries
        .iter()
        .skip_while(|entry| is_internal(symbol_name(&entry[0])))
        .flatten()
        .map(String::as_str)
        .collect();
    format!("Backtrace:\n{}", kept.join("\n"))
}

/// Group backtrace lines by symbol; `at file:line` lines stay with the
/// symbol above them. Inlined symbols sharing a frame number get their own
/// entry.
fn split_symbols(text: &str) -> Vec<Vec<String>> {
    let mut entries: Vec<Vec<String>> = Vec::new();
    for line in text.lines() {
        let is_location = line.trim_start().starts_with("at ");
        match entries.last_mut() {
            Some(entry) if is_location => entry.push(line.to_string()),
            _ => entries.push(vec![line.to_string()]),
        }
    }
    entries
}

/// Symbol text of a line, without the `N:` frame number.
fn symbol_name(line: &str) -> &str {
    let trimmed = line.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    match trimmed[digits..].strip_prefix(':') {
        Some(rest) if digits > 0 => rest.trim_start(),
        _ => trimmed,
    }
}

fn is_internal(symbol: &str) -> bool {
    INTERNAL_PREFIXES.iter().any(|prefix| symbol.starts_with(prefix))
}
