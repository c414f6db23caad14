//! Configuration management for the `TripSmith` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripSmithError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripSmith` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Text-generation collaborator configuration
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Routing collaborator configuration
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Default trip parameters for the interactive surface
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Text-generation API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Gemini API key; optional here because the `GEMINI_API_KEY`
    /// environment variable is accepted as a fallback
    pub api_key: Option<String>,
    /// Base URL for the generation API
    #[serde(default = "default_generation_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_generation_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u32,
    /// Retries on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Routing API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Base URL for the OSRM instance
    #[serde(default = "default_routing_base_url")]
    pub base_url: String,
    /// Routing profile
    #[serde(default = "default_routing_profile")]
    pub profile: String,
    /// Request timeout in seconds
    #[serde(default = "default_routing_timeout")]
    pub timeout_seconds: u32,
    /// Retries on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
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

/// Default trip parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_start_city")]
    pub start_city: String,
    #[serde(default = "default_end_city")]
    pub end_city: String,
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
    /// Budget in USD, converted once at collection time
    #[serde(default = "default_budget_usd")]
    pub budget_usd: u64,
    #[serde(default = "default_interests")]
    pub interests: String,
    #[serde(default = "default_style")]
    pub style: String,
}

// Default value functions
fn default_generation_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_generation_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_generation_timeout() -> u32 {
    30
}

fn default_routing_base_url() -> String {
    "http://router.project-osrm.org".to_string()
}

fn default_routing_profile() -> String {
    "driving".to_string()
}

fn default_routing_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_start_city() -> String {
    "Colombo".to_string()
}

fn default_end_city() -> String {
    "Colombo".to_string()
}

fn default_duration_days() -> u32 {
    5
}

fn default_budget_usd() -> u64 {
    500
}

fn default_interests() -> String {
    "Culture, Beach".to_string()
}

fn default_style() -> String {
    "Mid-range".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_generation_base_url(),
            model: default_generation_model(),
            timeout_seconds: default_generation_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: default_routing_base_url(),
            profile: default_routing_profile(),
            timeout_seconds: default_routing_timeout(),
            max_retries: default_max_retries(),
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

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            start_city: default_start_city(),
            end_city: default_end_city(),
            duration_days: default_duration_days(),
            budget_usd: default_budget_usd(),
            interests: default_interests(),
            style: default_style(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            routing: RoutingConfig::default(),
            logging: LoggingConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl GenerationConfig {
    /// Resolve the API key from config or environment
    pub fn api_key(&self) -> std::result::Result<String, TripSmithError> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TripSmithError::config(
                    "Missing Gemini API key. Set generation.api_key or the GEMINI_API_KEY environment variable.",
                )
            })
    }
}

impl PlannerConfig {
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

        // Add environment variable overrides with TRIPSMITH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRIPSMITH")
                .separator("_")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripsmith").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.generation.timeout_seconds == 0 || self.generation.timeout_seconds > 300 {
            return Err(TripSmithError::config(
                "Generation API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.routing.timeout_seconds == 0 || self.routing.timeout_seconds > 300 {
            return Err(
                TripSmithError::config("Routing API timeout must be between 1 and 300 seconds")
                    .into(),
            );
        }

        if self.generation.max_retries > 10 || self.routing.max_retries > 10 {
            return Err(TripSmithError::config("Max retries cannot exceed 10").into());
        }

        if !(1..=14).contains(&self.defaults.duration_days) {
            return Err(
                TripSmithError::config("Default trip duration must be between 1 and 14 days")
                    .into(),
            );
        }

        if self.defaults.budget_usd == 0 {
            return Err(TripSmithError::config("Default budget cannot be zero").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripSmithError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripSmithError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Generation", &self.generation.base_url),
            ("Routing", &self.routing.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripSmithError::config(format!(
                    "{name} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.routing.profile.trim().is_empty() {
            return Err(TripSmithError::config("Routing profile cannot be empty").into());
        }

        Ok(())
    }

    /// Create configuration directory if it doesn't exist
    pub fn ensure_config_dir() -> Result<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            let tripsmith_config_dir = config_dir.join("tripsmith");
            std::fs::create_dir_all(&tripsmith_config_dir).with_context(|| {
                format!(
                    "Failed to create config directory: {}",
                    tripsmith_config_dir.display()
                )
            })?;
            Ok(tripsmith_config_dir)
        } else {
            Err(TripSmithError::config("Unable to determine config directory").into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(
            config.generation.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.generation.model, "gemini-1.5-flash");
        assert_eq!(config.routing.base_url, "http://router.project-osrm.org");
        assert_eq!(config.routing.profile, "driving");
        assert_eq!(config.generation.max_retries, 1);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.defaults.start_city, "Colombo");
        assert!(config.generation.api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid log level")
        );
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = PlannerConfig::default();
        config.generation.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout must be between")
        );
    }

    #[test]
    fn test_config_validation_bad_base_url() {
        let mut config = PlannerConfig::default();
        config.routing.base_url = "router.project-osrm.org".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_default_duration() {
        let mut config = PlannerConfig::default();
        config.defaults.duration_days = 20;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_from_config_value() {
        let mut config = GenerationConfig::default();
        config.api_key = Some("test_key_123".to_string());
        assert_eq!(config.api_key().unwrap(), "test_key_123");
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        let mut config = GenerationConfig::default();
        config.api_key = Some(String::new());
        if std::env::var("GEMINI_API_KEY").is_err() {
            assert!(config.api_key().is_err());
        }
    }

    #[test]
    fn test_config_path_generation() {
        let path = PlannerConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripsmith"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
