use std::env;
use std::time::Duration;

use auth::HashingCost;
use auth::PasswordError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::auth::service::AuthSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub hasher: HasherConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub call_timeout_seconds: u64,
}

/// Argon2 cost overrides; unset fields keep the default cost.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct HasherConfig {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__TTL_SECONDS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_seconds)
    }

    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            token_ttl: Duration::from_secs(self.token.ttl_seconds),
            store_timeout: Duration::from_secs(self.storage.call_timeout_seconds),
        }
    }
}

impl HasherConfig {
    /// Resolve the configured cost, falling back to the default per field.
    pub fn cost(&self) -> Result<HashingCost, PasswordError> {
        let default = HashingCost::default();

        HashingCost::new(
            self.memory_kib.unwrap_or(default.memory_kib),
            self.iterations.unwrap_or(default.iterations),
            self.parallelism.unwrap_or(default.parallelism),
        )
    }
}
