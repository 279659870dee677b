//! Configuration management for the disaster prediction service
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use crate::DisasterApiError;
use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "DISASTER_API_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Bulk prediction settings
    #[serde(default)]
    pub bulk: BulkConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on a whole inbound request, bulk included
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API, without the `/forecast` path
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u64,
    /// Number of forecast days requested upstream
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,
    /// Retries for transient upstream failures
    #[serde(default)]
    pub max_retries: u32,
}

/// Bulk (`/all`) prediction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkConfig {
    /// Number of regions, from the head of the table, covered by a bulk run
    #[serde(default = "default_bulk_limit")]
    pub limit: usize,
    /// Maximum upstream calls in flight during a bulk run
    #[serde(default = "default_bulk_concurrency")]
    pub concurrency: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u64 {
    5
}

fn default_forecast_days() -> u8 {
    3
}

fn default_bulk_limit() -> usize {
    10
}

fn default_bulk_concurrency() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            forecast_days: default_forecast_days(),
            max_retries: 0,
        }
    }
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            limit: default_bulk_limit(),
            concurrency: default_bulk_concurrency(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_from_path(path)
    }

    /// Load configuration from the specified path, falling back to `config.toml`
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }

        // DISASTER_API_WEATHER__TIMEOUT_SECONDS=8 -> weather.timeout_seconds
        builder = builder.add_source(
            Environment::with_prefix("DISASTER_API")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_port_override(env::var("PORT").ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Apply the conventional `PORT` variable used by hosting platforms
    pub fn apply_port_override(&mut self, port: Option<String>) -> Result<()> {
        if let Some(port) = port {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| DisasterApiError::config(format!("Invalid PORT value '{port}'")))?;
        }
        Ok(())
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 60 {
            return Err(DisasterApiError::config(
                "Weather API timeout must be between 1 and 60 seconds",
            )
            .into());
        }

        if !(3..=7).contains(&self.weather.forecast_days) {
            return Err(DisasterApiError::config(
                "Forecast days must be between 3 and 7",
            )
            .into());
        }

        if self.weather.max_retries > 5 {
            return Err(DisasterApiError::config(
                "Weather API max retries cannot exceed 5",
            )
            .into());
        }

        if self.bulk.limit == 0 {
            return Err(DisasterApiError::config("Bulk limit must be at least 1").into());
        }

        if !(1..=10).contains(&self.bulk.concurrency) {
            return Err(DisasterApiError::config(
                "Bulk concurrency must be between 1 and 10",
            )
            .into());
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(DisasterApiError::config(
                "Request timeout must be at least 1 second",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(DisasterApiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(DisasterApiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(DisasterApiError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timeout_seconds, 5);
        assert_eq!(config.weather.forecast_days, 3);
        assert_eq!(config.weather.max_retries, 0);
        assert_eq!(config.bulk.limit, 10);
        assert_eq!(config.bulk.concurrency, 5);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_port_override() {
        let mut config = AppConfig::default();
        config.apply_port_override(Some("9090".to_string())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_address(), "0.0.0.0:9090");

        config.apply_port_override(None).unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_invalid_port_override() {
        let mut config = AppConfig::default();
        let result = config.apply_port_override(Some("eighty".to_string()));
        assert!(result.unwrap_err().to_string().contains("Invalid PORT"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = AppConfig::default();
        config.weather.forecast_days = 10;
        assert!(config.validate().unwrap_err().to_string().contains("Forecast days"));

        let mut config = AppConfig::default();
        config.bulk.concurrency = 0;
        assert!(config.validate().unwrap_err().to_string().contains("concurrency"));

        let mut config = AppConfig::default();
        config.weather.timeout_seconds = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_config_validation_base_url() {
        let mut config = AppConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = env::temp_dir().join(format!("disaster-api-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[weather]\ntimeout_seconds = 8\nforecast_days = 7\n\n[bulk]\nlimit = 4").unwrap();

        let config = AppConfig::load_from_path(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.weather.timeout_seconds, 8);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.bulk.limit, 4);
        // untouched sections keep their defaults
        assert_eq!(config.bulk.concurrency, 5);
        assert_eq!(config.logging.format, "pretty");
    }
}
