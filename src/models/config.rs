//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError};
use serde::Deserialize;

fn default_backend_timeout_secs() -> u64 {
    10
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    pub backend_url: String,
    #[serde(default = "default_backend_timeout_secs")]
    pub backend_timeout_secs: u64,
    #[serde(default)]
    pub weather_api_key: Option<String>,
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,
}

impl ServerConfig {
    /// Layers `{dir}/default`, the optional `{dir}/{app_env}` profile and
    /// `APP_*` environment variables, in that order.
    pub fn load(config_dir: impl AsRef<Path>, app_env: &str) -> Result<Self, ConfigError> {
        let dir = config_dir.as_ref();
        let default_file = dir.join("default");
        let profile_file = dir.join(app_env);

        Config::builder()
            .add_source(config::File::with_name(&default_file.to_string_lossy()))
            .add_source(config::File::with_name(&profile_file.to_string_lossy()).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
