//! Subcommand implementations

pub mod account;
pub mod market;
pub mod ping;
pub mod query;

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use orionx::{Config, OrionxClient};

/// Options shared by every subcommand
#[derive(Debug, Clone)]
pub struct Context {
    pub config_path: Option<PathBuf>,
    pub debug: bool,
}

impl Context {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => {
                let config = Config::from_file(path)?;
                info!("Loaded configuration from: {}", path.display());
                config
            }
            None => Config::from_env()?,
        };
        if self.debug {
            config.debug = true;
        }
        debug!("Configuration: {:?}", config);

        if !config.is_valid() {
            anyhow::bail!(
                "Missing API credentials: set ORIONX_API_KEY and ORIONX_API_SECRET or pass --config"
            );
        }
        Ok(config)
    }

    pub fn client(&self) -> Result<OrionxClient> {
        let config = self.load_config()?;
        OrionxClient::from_config(&config).context("Failed to create OrionX client")
    }
}

/// Run a future on a fresh runtime
pub fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new()?;
    Ok(rt.block_on(future))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
