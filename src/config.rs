use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};
use validator::{Validate, ValidationError};

use crate::auth::{EditAuthorizer, DEFAULT_EDIT_PASSWORD, DEFAULT_EDIT_USERNAME};
use crate::common::validate_not_blank;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "build";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_UNIT_ROSTER_URL: &str =
    "https://raw.githubusercontent.com/aankcryzers/Monitoring-Breakdown/main/unit.json";
const DEFAULT_UNIT_ROSTER_TIMEOUT_SECS: u64 = 10;
const CONFIG_DIR: &str = "config";

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Server host address
    pub host: String,

    /// Server port; `PORT` in the environment wins over every other source
    #[validate(range(min = 1))]
    pub port: u16,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Directory holding the built front-end
    pub static_dir: PathBuf,

    /// Directory holding the stored JSON documents
    pub data_dir: PathBuf,

    /// Where the unit roster is downloaded from on first run
    pub unit_roster_url: String,

    #[validate(range(min = 1, max = 300))]
    pub unit_roster_timeout_secs: u64,

    #[validate(custom = "validate_not_blank")]
    pub edit_username: String,

    #[validate(custom = "validate_not_blank")]
    pub edit_password: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn unit_roster_timeout(&self) -> Duration {
        Duration::from_secs(self.unit_roster_timeout_secs)
    }

    pub fn edit_authorizer(&self) -> EditAuthorizer {
        EditAuthorizer::new(self.edit_username.clone(), self.edit_password.clone())
    }

    /// Applies a `PORT` value. Unparseable values are ignored with a warning.
    fn apply_port_override(&mut self, port: Option<String>) {
        let Some(raw) = port.filter(|p| !p.trim().is_empty()) else {
            return;
        };
        match raw.trim().parse::<u16>() {
            Ok(port) => self.port = port,
            Err(e) => warn!("Ignoring PORT={:?}: {}", raw, e),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter.
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("plant_maintenance={},tower_http=debug", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .json()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(EnvFilter::new(filter_directive))
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Built-in defaults
/// 2. Default config (config/default.toml)
/// 3. Environment-specific config (config/{env}.toml)
/// 4. Environment variables (APP__*)
/// 5. `PORT`
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let mut app_config = load_config_from(Path::new(CONFIG_DIR), &run_env)?;
    app_config.apply_port_override(env::var("PORT").ok());

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

/// Builds the layered configuration from `dir` without the `PORT` override.
pub fn load_config_from(dir: &Path, run_env: &str) -> Result<AppConfig, AppConfigError> {
    let config = Config::builder()
        .set_default("host", DEFAULT_HOST)?
        .set_default("port", i64::from(DEFAULT_PORT))?
        .set_default("environment", run_env)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .set_default("static_dir", DEFAULT_STATIC_DIR)?
        .set_default("data_dir", DEFAULT_DATA_DIR)?
        .set_default("unit_roster_url", DEFAULT_UNIT_ROSTER_URL)?
        .set_default(
            "unit_roster_timeout_secs",
            DEFAULT_UNIT_ROSTER_TIMEOUT_SECS as i64,
        )?
        .set_default("edit_username", DEFAULT_EDIT_USERNAME)?
        .set_default("edit_password", DEFAULT_EDIT_PASSWORD)?
        .add_source(File::from(dir.join("default")).required(false))
        .add_source(File::from(dir.join(run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}
