//! Configuration management for the Pasture Management Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with PMS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Vegetation data provider configuration
    pub vegetation: VegetationConfig,

    /// Soil-moisture provider configuration
    pub soil_moisture: SoilMoistureConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Prediction model configuration
    pub models: ModelConfig,

    /// Feed planning configuration
    pub feed: FeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VegetationConfig {
    /// High-resolution vegetation index endpoint (small parcels)
    pub high_res_endpoint: String,

    /// Coarse vegetation index endpoint (250 m-equivalent grid)
    pub coarse_endpoint: String,

    /// API key shared by both vegetation services
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilMoistureConfig {
    /// Soil-moisture time-series endpoint
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather forecast endpoint
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Directory holding the regression model artifacts
    pub dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Default feed cost per kg dry matter, used when a request does not
    /// supply its own rate
    pub default_cost_per_kg: f64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("PMS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default(
                "vegetation.high_res_endpoint",
                "https://api.spectra-fields.example/v1",
            )?
            .set_default(
                "vegetation.coarse_endpoint",
                "https://modis.ornl.example/rst/api/v1",
            )?
            .set_default("vegetation.api_key", "")?
            .set_default("soil_moisture.endpoint", "https://soil.hydro-grid.example/v1")?
            .set_default("weather.endpoint", "https://api.open-meteo.com")?
            .set_default("models.dir", "models")?
            .set_default("feed.default_cost_per_kg", 0.25)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (PMS_ prefix)
            .add_source(
                Environment::with_prefix("PMS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
