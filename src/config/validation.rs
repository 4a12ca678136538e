//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes and recipients reference declared sinks)
//! - Check level names and required values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function of the config plus the names the target context already has
//! - A sink may only reference sinks declared before it

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::{LoggingConfig, SinkKind};
use crate::level::Level;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateSink(String),
    EmptySinkName,
    EmptyFilePath { sink: String },
    UnknownMember { sink: String, member: String },
    InvalidLevel { route: usize, level: String },
    UnknownSink { route: usize, sink: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSink(name) => write!(f, "sink '{}' declared more than once", name),
            Self::EmptySinkName => write!(f, "sink name must not be empty"),
            Self::EmptyFilePath { sink } => write!(f, "file sink '{}' has an empty path", sink),
            Self::UnknownMember { sink, member } => {
                write!(f, "recipients sink '{}' references unknown sink '{}'", sink, member)
            }
            Self::InvalidLevel { route, level } => {
                write!(f, "route #{} has invalid level '{}'", route, level)
            }
            Self::UnknownSink { route, sink } => {
                write!(f, "route #{} references unknown sink '{}'", route, sink)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate `config`; `known_sinks` are names already registered in the
/// context it will be applied to.
pub fn validate_config<S: AsRef<str>>(
    config: &LoggingConfig,
    known_sinks: &[S],
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut declared: HashSet<&str> = known_sinks.iter().map(AsRef::as_ref).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for sink in &config.sinks {
        let name = sink.name.as_str();
        if name.is_empty() {
            errors.push(ValidationError::EmptySinkName);
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateSink(name.to_string()));
        }

        match &sink.kind {
            SinkKind::File { path } if path.trim().is_empty() => {
                errors.push(ValidationError::EmptyFilePath { sink: name.to_string() });
            }
            SinkKind::Recipients { members } => {
                for member in members.iter().filter(|m| !declared.contains(m.as_str())) {
                    errors.push(ValidationError::UnknownMember {
                        sink: name.to_string(),
                        member: member.clone(),
                    });
                }
            }
            _ => {}
        }

        declared.insert(name);
    }

    for (i, route) in config.routes.iter().enumerate() {
        if route.level.parse::<Level>().is_err() {
            errors.push(ValidationError::InvalidLevel {
                route: i,
                level: route.level.clone(),
            });
        }
        if !declared.contains(route.sink.as_str()) {
            errors.push(ValidationError::UnknownSink {
                route: i,
                sink: route.sink.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RouteConfig, SinkConfig};
    use crate::routing::ROOT;

    fn route(level: &str, sink: &str) -> RouteConfig {
        RouteConfig {
            pattern: ROOT.to_string(),
            level: level.to_string(),
            sink: sink.to_string(),
        }
    }

    fn sink(name: &str, kind: SinkKind) -> SinkConfig {
        SinkConfig { name: name.to_string(), kind }
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_valid_config() {
        let config = LoggingConfig {
            sinks: vec![
                sink("console", SinkKind::Console { plain: false }),
                sink("both", SinkKind::Recipients { members: vec!["console".into()] }),
            ],
            routes: vec![route("INFO", "console"), route("trace", "both")],
        };
        assert!(validate_config(&config, NONE).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let config = LoggingConfig {
            sinks: vec![
                sink("f", SinkKind::File { path: " ".into() }),
                sink("f", SinkKind::Tracing),
                sink("fan", SinkKind::Recipients { members: vec!["later".into()] }),
                sink("later", SinkKind::Tracing),
            ],
            routes: vec![route("LOUD", "f"), route("INFO", "missing")],
        };
        let errors = validate_config(&config, NONE).unwrap_err();

        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyFilePath { sink: "f".into() },
                ValidationError::DuplicateSink("f".into()),
                ValidationError::UnknownMember { sink: "fan".into(), member: "later".into() },
                ValidationError::InvalidLevel { route: 0, level: "LOUD".into() },
                ValidationError::UnknownSink { route: 1, sink: "missing".into() },
            ]
        );
    }

    #[test]
    fn test_known_sinks_count_as_declared() {
        let config = LoggingConfig {
            sinks: vec![],
            routes: vec![route("WARN", "console")],
        };
        assert!(validate_config(&config, NONE).is_err());
        assert!(validate_config(&config, &["console"]).is_ok());
    }
}
