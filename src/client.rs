//! High-level OrionX client
//!
//! Owns a [`RequestExecutor`] and hands out borrowed endpoint views.
//!
//! ```no_run
//! use orionx::{Config, OrionxClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = OrionxClient::from_config(&Config::from_env()?)?;
//! let markets = client.markets().get_markets().await?;
//! println!("{:?}", markets);
//! # Ok(())
//! # }
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::api::{ClientConfig, Credentials, HttpTransport, RequestExecutor, Transport};
use crate::config::Config;
use crate::endpoints::{Accounts, Markets, Orders, Transactions, User};
use crate::error::Result;

/// Outcome of a [`OrionxClient::ping`] health check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum PingStatus {
    Ok(String),
    Error(String),
}

impl PingStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, PingStatus::Ok(_))
    }

    pub fn message(&self) -> &str {
        match self {
            PingStatus::Ok(message) | PingStatus::Error(message) => message,
        }
    }
}

#[derive(Debug)]
pub struct OrionxClient<T: Transport = HttpTransport> {
    api: RequestExecutor<T>,
}

impl OrionxClient<HttpTransport> {
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let client = Self {
            api: RequestExecutor::new(credentials, config)?,
        };
        info!("OrionX client initialized");
        Ok(client)
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.credentials(), config.client_config())
    }
}

impl<T: Transport> OrionxClient<T> {
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Result<Self> {
        Ok(Self {
            api: RequestExecutor::with_transport(credentials, config, transport)?,
        })
    }

    pub fn user(&self) -> User<'_, T> {
        User::new(&self.api)
    }

    pub fn orders(&self) -> Orders<'_, T> {
        Orders::new(&self.api)
    }

    pub fn accounts(&self) -> Accounts<'_, T> {
        Accounts::new(&self.api)
    }

    pub fn markets(&self) -> Markets<'_, T> {
        Markets::new(&self.api)
    }

    pub fn transactions(&self) -> Transactions<'_, T> {
        Transactions::new(&self.api)
    }

    /// Raw executor for custom documents
    pub fn api(&self) -> &RequestExecutor<T> {
        &self.api
    }

    pub fn is_debug(&self) -> bool {
        self.api.config().debug
    }

    pub async fn me(&self) -> Result<Option<Value>> {
        self.user().me().await
    }

    /// Fetch the profile and report whether the round trip worked
    pub async fn ping(&self) -> PingStatus {
        match self.me().await {
            Ok(_) => PingStatus::Ok("Connection successful".to_string()),
            Err(e) => PingStatus::Error(e.message().to_string()),
        }
    }
}
