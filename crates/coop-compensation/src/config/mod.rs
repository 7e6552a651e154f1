use std::env;
use std::fmt;

/// Default currency value of one point.
pub const DEFAULT_POINT_VALUE: f64 = 7.0;

/// Distinguishes runtime behavior for different stages of deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub engine: EngineConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let point_value = match env::var("APP_POINT_VALUE") {
            Ok(raw) => parse_point_value(&raw)?,
            Err(_) => DEFAULT_POINT_VALUE,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            engine: EngineConfig { point_value },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings injected into every engine call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub point_value: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            point_value: DEFAULT_POINT_VALUE,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

pub fn parse_point_value(raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidPointValue(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidPointValue(raw.to_string()));
    }
    Ok(value)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPointValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPointValue(raw) => write!(
                f,
                "APP_POINT_VALUE must be a finite, non-negative number (got '{}')",
                raw
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_POINT_VALUE");
        env::remove_var("APP_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.engine.point_value, DEFAULT_POINT_VALUE);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_point_value_override() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_POINT_VALUE", " 7.5 ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.engine.point_value, 7.5);
        reset_env();
    }

    #[test]
    fn rejects_negative_or_garbage_point_value() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_POINT_VALUE", "-1");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPointValue(raw)) if raw == "-1"
        ));
        env::set_var("APP_POINT_VALUE", "seven");
        assert!(AppConfig::load().is_err());
        assert!(parse_point_value("NaN").is_err());
        reset_env();
    }
}
