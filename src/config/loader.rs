//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::LoggingConfig;
use crate::config::validation::ValidationError;

/// Failure to load or validate a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Read and parse a TOML configuration file.
///
/// Semantic validation is deferred to [`LoggingConfig::apply`], which knows
/// the sinks the target context already has.
pub fn load_config(path: &Path) -> Result<LoggingConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = LoggingConfig::from_toml(&content)?;
    tracing::debug!(
        path = %path.display(),
        sinks = config.sinks.len(),
        routes = config.routes.len(),
        "Logging config loaded"
    );
    Ok(config)
}

impl LoggingConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SinkKind;
    use crate::routing::ROOT;
    use std::io::Write;

    #[test]
    fn test_parse_minimal() {
        let config = LoggingConfig::from_toml("").unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_parse_sinks_and_routes() {
        let config = LoggingConfig::from_toml(
            r#"
            [[sinks]]
            name = "out"
            type = "console"
            plain = true

            [[sinks]]
            name = "bridge"
            type = "tracing"

            [[routes]]
            level = "INFO"
            sink = "out"

            [[routes]]
            pattern = "db.*"
            level = "trace"
            sink = "bridge"
            "#,
        )
        .unwrap();

        assert_eq!(config.sinks[0].kind, SinkKind::Console { plain: true });
        assert_eq!(config.sinks[1].kind, SinkKind::Tracing);
        assert_eq!(config.routes[0].pattern, ROOT);
        assert_eq!(config.routes[1].pattern, "db.*");
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = LoggingConfig::from_toml("[[sinks]]\nname = \"x\"\ntype = \"syslog\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[sinks]]\nname = \"f\"\ntype = \"file\"\npath = \"/tmp/x.log\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.sinks[0].kind, SinkKind::File { path: "/tmp/x.log".into() });
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_display_joins_errors() {
        let err = ConfigError::Validation(vec![
            ValidationError::EmptySinkName,
            ValidationError::DuplicateSink("a".into()),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: sink name must not be empty, sink 'a' declared more than once"
        );
    }
}
