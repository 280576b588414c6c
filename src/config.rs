use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::core::AppKind;

/// Errors that can occur loading configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub models: ModelSettings,
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    #[serde(default = "default_port")]
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(range(min = 1, max = 64))]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8501 }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModelSettings {
    #[serde(default = "default_house_path")]
    #[validate(length(min = 1))]
    pub house_path: String,
    #[serde(default = "default_car_path")]
    #[validate(length(min = 1))]
    pub car_path: String,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            house_path: default_house_path(),
            car_path: default_car_path(),
        }
    }
}

impl ModelSettings {
    pub fn path_for(&self, app: AppKind) -> &str {
        match app {
            AppKind::House => &self.house_path,
            AppKind::Car => &self.car_path,
        }
    }
}

fn default_house_path() -> String { AppKind::House.spec().default_model_path.to_string() }
fn default_car_path() -> String { AppKind::Car.spec().default_model_path.to_string() }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    #[validate(length(min = 1))]
    pub level: String,
    #[serde(default = "default_log_format")]
    #[validate(custom(function = "validate_log_format"))]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

fn validate_log_format(format: &str) -> Result<(), ValidationError> {
    match format {
        "json" | "pretty" => Ok(()),
        _ => Err(ValidationError::new("log_format")),
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PREDICTOR)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PREDICTOR__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, SettingsError> {
        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("PREDICTOR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
