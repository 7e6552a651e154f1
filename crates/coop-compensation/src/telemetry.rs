use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::{LevelFilter, ParseError};
use tracing_subscriber::EnvFilter;

/// Dependencies stay at `warn` unless `APP_LOG_LEVEL` or `RUST_LOG` spells out a full filter.
const DEPENDENCY_LEVEL: &str = "warn";
const ENGINE_TARGET: &str = "coop_compensation";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "APP_LOG_LEVEL '{value}' is not a valid engine log filter")
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "engine logging already initialised or unavailable: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so report output on stdout stays clean.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => engine_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

/// Builds the filter for a configured level. A bare level such as `debug` applies to the
/// engine and CLI crates only; anything else is taken as a full directive list.
pub fn engine_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(engine_directives(log_level)).map_err(|source| {
        TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        }
    })
}

fn engine_directives(log_level: &str) -> String {
    let trimmed = log_level.trim();
    if trimmed.parse::<LevelFilter>().is_ok() {
        format!("{DEPENDENCY_LEVEL},{ENGINE_TARGET}={trimmed}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_engine_targets() {
        assert_eq!(engine_directives("debug"), "warn,coop_compensation=debug");
        assert_eq!(engine_directives(" info "), "warn,coop_compensation=info");
    }

    #[test]
    fn directive_lists_pass_through() {
        assert_eq!(
            engine_directives("coop_compensation::allocation=trace"),
            "coop_compensation::allocation=trace"
        );
    }

    #[test]
    fn invalid_filter_reports_configured_value() {
        let err = engine_filter("coop_compensation=loud").expect_err("level is not valid");
        assert!(err.to_string().contains("coop_compensation=loud"));
    }
}
