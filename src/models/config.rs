use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::forms::upload::DEFAULT_MAX_UPLOAD_BYTES;

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "app.db".to_string()
}

fn default_generation_delay_ms() -> u64 {
    1500
}

fn default_true() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

/// Configuration options of the wardrobe service.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the SQLite database holding storage records.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Artificial latency before a generated batch is published. Zero
    /// disables the delay.
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,
    /// Write the wardrobe record even when the wardrobe is empty.
    #[serde(default)]
    pub persist_empty_wardrobe: bool,
    /// Allow up to three accessories per outfit instead of two.
    #[serde(default)]
    pub inclusive_accessory_cap: bool,
    /// Label generated outfits with an occasion.
    #[serde(default = "default_true")]
    pub assign_occasion: bool,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            database_url: default_database_url(),
            generation_delay_ms: default_generation_delay_ms(),
            persist_empty_wardrobe: false,
            inclusive_accessory_cap: false,
            assign_occasion: true,
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// Load `config/default.yaml`, then `config/{APP_ENV}.yaml`, then `APP_*`
    /// environment variables. Every source is optional.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
