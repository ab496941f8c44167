//! Configuration management for the `CropCast` service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::CropCastError;

/// Root configuration structure for the `CropCast` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropCastConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Crop rule table configuration
    #[serde(default)]
    pub crops: CropsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Timezone sent with every forecast request
    #[serde(default = "default_weather_timezone")]
    pub timezone: String,
    /// Number of forecast days to request
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Crop rule table settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropsConfig {
    /// Optional TOML rule file; the builtin table is used when unset
    #[serde(default)]
    pub rules_file: Option<String>,
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

// Default value functions
fn default_server_port() -> u16 {
    8000
}

fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timezone() -> String {
    "Asia/Tokyo".to_string()
}

fn default_forecast_days() -> u32 {
    7
}

fn default_weather_timeout() -> u32 {
    30
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
            port: default_server_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timezone: default_weather_timezone(),
            forecast_days: default_forecast_days(),
            timeout_seconds: default_weather_timeout(),
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

impl Default for CropCastConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            crops: CropsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CropCastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with CROPCAST_ prefix
        builder = builder.add_source(
            Environment::with_prefix("CROPCAST")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: CropCastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cropcast").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(CropCastError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        // Open-Meteo serves at most 16 forecast days
        if self.weather.forecast_days == 0 || self.weather.forecast_days > 16 {
            return Err(CropCastError::config(
                "Forecast days must be between 1 and 16",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CropCastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CropCastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(CropCastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.weather.timezone.is_empty() {
            return Err(CropCastError::config("Weather timezone cannot be empty").into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CropCastConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.weather.base_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.weather.timezone, "Asia/Tokyo");
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.logging.level, "info");
        assert!(config.crops.rules_file.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = CropCastConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = CropCastConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = CropCastConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_config_validation_forecast_days_range() {
        let mut config = CropCastConfig::default();
        config.weather.forecast_days = 17;
        assert!(config.validate().is_err());

        config.weather.forecast_days = 0;
        assert!(config.validate().is_err());

        config.weather.forecast_days = 16;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_base_url_scheme() {
        let mut config = CropCastConfig::default();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = CropCastConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("cropcast"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
