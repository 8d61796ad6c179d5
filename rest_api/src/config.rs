// rest_api/src/config.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const DEFAULT_REST_API_PORT: u16 = 8082;
pub const ENV_PREFIX: &str = "HOSTEL";

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, Deserialize)]
pub struct RestApiConfig {
    pub host: String,
    pub port: u16,
    pub data_directory: PathBuf,
    #[serde(default)]
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub log_level: String,
    pub cors_allow_any_origin: bool,
}

impl RestApiConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.token_ttl_hours)
    }

    fn validate(self) -> Result<Self> {
        if self.jwt_secret.trim().is_empty() {
            anyhow::bail!("jwt_secret must be set (config file or {}_JWT_SECRET)", ENV_PREFIX);
        }
        if self.token_ttl_hours <= 0 {
            anyhow::bail!("token_ttl_hours must be positive, got {}", self.token_ttl_hours);
        }
        Ok(self)
    }
}

/// Loads the REST API configuration.
///
/// Sources, later ones winning: built-in defaults, the YAML file at
/// `config_file` (or an optional `hostel.yaml` in the working directory),
/// then `HOSTEL_*` environment variables. A `.env` file is read first.
pub fn load_rest_api_config(config_file: Option<&Path>) -> Result<RestApiConfig> {
    dotenv::dotenv().ok();

    let file_source = match config_file {
        Some(path) => File::from(path).required(true),
        None => File::with_name("hostel").required(false),
    };

    let settings = Config::builder()
        .set_default("host", "127.0.0.1")?
        .set_default("port", i64::from(DEFAULT_REST_API_PORT))?
        .set_default("data_directory", "./hostel_data")?
        .set_default("jwt_secret", "")?
        .set_default("token_ttl_hours", 24_i64)?
        .set_default("log_level", "info")?
        .set_default("cors_allow_any_origin", true)?
        .add_source(file_source)
        .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
        .build()
        .context("Failed to assemble REST API configuration")?;

    settings
        .try_deserialize::<RestApiConfig>()
        .context("Failed to parse REST API configuration")?
        .validate()
}
