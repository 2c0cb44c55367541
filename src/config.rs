//! Configuration management
//!
//! Loads client settings from a JSON file and/or `ORIONX_*` environment
//! variables (a `.env` file is honoured). Environment values win over the
//! file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::api::{ClientConfig, Credentials, DEFAULT_API_ENDPOINT};

const ENV_API_KEY: &str = "ORIONX_API_KEY";
const ENV_API_SECRET: &str = "ORIONX_API_SECRET";
const ENV_API_ENDPOINT: &str = "ORIONX_API_ENDPOINT";
const ENV_TIMEOUT: &str = "ORIONX_TIMEOUT";
const ENV_RETRIES: &str = "ORIONX_RETRIES";
const ENV_DEBUG: &str = "ORIONX_DEBUG";

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    pub api_endpoint: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub retries: u32,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_secret: None,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: 30,
            retries: 3,
            debug: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("api_endpoint", &self.api_endpoint)
            .field("timeout", &self.timeout)
            .field("retries", &self.retries)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    /// Load configuration from a JSON file, then apply environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Self::read_file(path.as_ref())?;

        dotenv::dotenv().ok();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// File contents only, no environment
    fn read_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents).context("Failed to parse config JSON")
    }

    /// Defaults plus environment (including `.env`)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Config::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply `ORIONX_*` values returned by `lookup`; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(api_key) = get(ENV_API_KEY) {
            self.api_key = Some(api_key);
        }
        if let Some(api_secret) = get(ENV_API_SECRET) {
            self.api_secret = Some(api_secret);
        }
        if let Some(endpoint) = get(ENV_API_ENDPOINT) {
            self.api_endpoint = endpoint;
        }
        if let Some(timeout) = get(ENV_TIMEOUT) {
            self.timeout = timeout
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_TIMEOUT, timeout))?;
        }
        if let Some(retries) = get(ENV_RETRIES) {
            self.retries = retries
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_RETRIES, retries))?;
        }
        if let Some(debug) = get(ENV_DEBUG) {
            self.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        Ok(())
    }

    /// Key, secret and endpoint are all present
    pub fn is_valid(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.api_key) && present(&self.api_secret) && !self.api_endpoint.is_empty()
    }

    /// Missing values become empty strings and are rejected when the
    /// executor is built
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.api_key.clone().unwrap_or_default(),
            self.api_secret.clone().unwrap_or_default(),
        )
        .with_endpoint(self.api_endpoint.clone())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout))
            .with_max_retries(self.retries)
            .with_debug(self.debug)
    }
}
