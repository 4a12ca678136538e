//! Route pattern matching.
//!
//! # Responsibilities
//! - Match a dotted pattern against a dotted module name
//! - Honour the `ROOT` sentinel and the trailing `*` wildcard segment
//!
//! # Design Decisions
//! - Segment-wise comparison, no regex, no allocation
//! - A wildcard must be a whole segment (`a.*`, never `a*`)
//! - A wildcard also matches when the module name ends right before it,
//!   so `a.*` matches `a`
//! - A pattern longer than the module name never matches

/// Sentinel pattern matching every module name.
pub const ROOT: &str = "__root__";

/// Wildcard segment.
pub const WILDCARD: &str = "*";

/// Returns true if `pattern` selects the logger named `module`.
///
/// Only `ROOT` matches an empty module name.
pub fn matches(pattern: &str, module: &str) -> bool {
    if pattern == ROOT {
        return true;
    }
    if module.is_empty() {
        return false;
    }

    let mut pattern_segments = pattern.split('.');
    let mut module_segments = module.split('.');

    loop {
        match (pattern_segments.next(), module_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(m)) if p == m => continue,
            (Some(WILDCARD), _) => return true,
            _ => return false,
        }
    }
}
