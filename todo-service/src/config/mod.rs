use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct TodoConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    /// `None` leaves the service running without a store connection.
    pub uri: Option<String>,
    /// Used only when the URI names no default database.
    pub database: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongodb,
    Memory,
}

impl TodoConfig {
    pub fn load() -> Result<Self, AppError> {
        // Common config also loads .env
        let common = core_config::Config::load()?;

        Ok(TodoConfig {
            common,
            mongodb: MongoConfig {
                uri: env::var("MONGODB_URI").ok().filter(|uri| !uri.trim().is_empty()),
                database: get_env("MONGODB_DATABASE", "test"),
            },
            store: get_env("TODO_STORE_BACKEND", "mongodb")
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
