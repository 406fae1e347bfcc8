//! Configuration management for the SpaceRain client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with SPACERAIN_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use spacerain_shared::EventTime;

use crate::error::{ClientError, ClientResult};

/// Main client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Analysis service configuration
    pub api: ApiConfig,

    /// Device geolocation configuration
    pub geolocation: GeolocationConfig,

    /// Map surface configuration
    pub map: MapConfig,

    /// Draft session defaults
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the analysis service
    pub base_url: String,

    /// Path of the probability endpoint
    pub probability_path: String,
}

impl ApiConfig {
    /// Full URL of the probability endpoint
    pub fn probability_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.probability_path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeolocationConfig {
    /// Whether device location may be requested at all
    pub enabled: bool,

    /// IP geolocation lookup endpoint
    pub service_url: String,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct MapConfig {
    /// Zoom used when the confirmation view opens
    pub default_zoom: u8,

    /// Zoom used when jumping to a preset city
    pub preset_zoom: u8,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Event time preselected in a new draft
    pub default_time: String,
}

impl SessionConfig {
    /// The configured default time, checked as `HH:MM`
    pub fn event_time(&self) -> ClientResult<EventTime> {
        self.default_time
            .parse()
            .map_err(|e| ClientError::Configuration(format!("session.default_time: {}", e)))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> ClientResult<Self> {
        let environment =
            std::env::var("SPACERAIN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::builder(&environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (SPACERAIN_ prefix)
            .add_source(
                Environment::with_prefix("SPACERAIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.session.event_time()?;
        Ok(config)
    }

    /// Configuration made only of the built-in defaults
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?.build()?.try_deserialize()
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("environment", environment)?
            .set_default("api.base_url", "http://localhost:5000")?
            .set_default("api.probability_path", "/api/calculate-probability")?
            .set_default("geolocation.enabled", true)?
            .set_default("geolocation.service_url", "http://ip-api.com/json")?
            .set_default("map.default_zoom", 10)?
            .set_default("map.preset_zoom", 12)?
            .set_default("session.default_time", "12:00")
    }
}
