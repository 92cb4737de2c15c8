//! Configuration loading from environment.

use std::env;
use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "sqlite://devises.db?mode=rwc";
const DEFAULT_EXCHANGE_API_URL: &str = "http://apilayer.net/api";

/// Application configuration.
pub struct Config {
    pub database_url: String,
    pub exchange_api_url: String,
    /// Without a key the offline rate table is used.
    pub exchange_api_key: Option<String>,
    /// Replacement for the bundled seed dataset.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let exchange_api_url =
            var("EXCHANGE_API_URL").unwrap_or_else(|| DEFAULT_EXCHANGE_API_URL.to_string());
        if !exchange_api_url.starts_with("http://") && !exchange_api_url.starts_with("https://") {
            anyhow::bail!("EXCHANGE_API_URL must be an http(s) URL, got {}", exchange_api_url);
        }

        Ok(Self {
            database_url,
            exchange_api_url,
            exchange_api_key: var("EXCHANGE_API_KEY"),
            seed_path: var("SEED_PATH").map(PathBuf::from),
        })
    }
}
