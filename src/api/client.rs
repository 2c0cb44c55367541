//! OrionX GraphQL request executor
//!
//! Every call goes through the same pipeline:
//! - sign `timestamp + body` with the API secret
//! - POST to the endpoint with the `X-ORIONX-*` headers
//! - classify the response into data or a typed error
//! - retry rate limits and HTTP 500s with exponential backoff
//!
//! # Example
//!
//! ```no_run
//! use orionx::api::{ClientConfig, Credentials, RequestExecutor};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Credentials::new("api_key", "api_secret");
//!     let api = RequestExecutor::new(credentials, ClientConfig::default())?;
//!
//!     let data = api
//!         .call("query sdk_market($code: ID) { market(code: $code) { name } }", json!({"code": "BTCCLP"}))
//!         .await?;
//!     println!("{:?}", data.get("market"));
//!     Ok(())
//! }
//! ```

use serde_json::{json, Value};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::auth::{timestamp_now, Credentials};
use super::response::{classify, GraphQLData};
use super::retry::RetryPolicy;
use super::transport::{HttpTransport, SignedRequest, Transport};
use crate::error::{ErrorKind, OrionxError, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout duration
    pub timeout: Duration,
    /// Maximum number of retries after the first attempt
    pub max_retries: u32,
    /// Log queries, headers and raw responses
    pub debug: bool,
    /// Delay before the first retry; doubles on every further retry
    pub backoff_unit: Duration,
    /// Optional ceiling for a single backoff delay
    pub max_backoff: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            debug: false,
            backoff_unit: Duration::from_secs(1),
            max_backoff: None,
        }
    }
}

impl ClientConfig {
    /// Set maximum retry attempts
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the first backoff delay
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = Some(max_backoff);
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let policy = RetryPolicy::new(self.max_retries, self.backoff_unit);
        match self.max_backoff {
            Some(cap) => policy.with_max_delay(cap),
            None => policy,
        }
    }
}

/// Signs, dispatches, classifies and retries GraphQL calls
///
/// Holds only immutable state, so a shared reference can serve concurrent
/// calls from many tasks.
#[derive(Debug)]
pub struct RequestExecutor<T: Transport = HttpTransport> {
    credentials: Credentials,
    config: ClientConfig,
    retry_policy: RetryPolicy,
    transport: T,
}

impl RequestExecutor<HttpTransport> {
    /// Validate credentials and build the HTTP transport
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        credentials.validate()?;
        let transport = HttpTransport::new(credentials.api_endpoint(), config.timeout)?;
        let executor = Self::assemble(credentials, config, transport);
        info!(
            "API connection established to {}",
            executor.credentials.api_endpoint()
        );
        Ok(executor)
    }
}

impl<T: Transport> RequestExecutor<T> {
    /// Use a custom transport. Credentials are validated before anything else.
    pub fn with_transport(credentials: Credentials, config: ClientConfig, transport: T) -> Result<Self> {
        credentials.validate()?;
        Ok(Self::assemble(credentials, config, transport))
    }

    fn assemble(credentials: Credentials, config: ClientConfig, transport: T) -> Self {
        let retry_policy = config.retry_policy();
        Self {
            credentials,
            config,
            retry_policy,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute a GraphQL query or mutation
    ///
    /// `variables` must be a JSON object; `Value::Null` is sent as `{}`.
    pub async fn call(&self, query: &str, variables: Value) -> Result<GraphQLData> {
        let variables = match variables {
            Value::Null => json!({}),
            Value::Object(_) => variables,
            _ => {
                return Err(OrionxError::Validation(
                    "GraphQL variables must be a JSON object".to_string(),
                ))
            }
        };

        if self.config.debug {
            debug!("GraphQL Query: {}", query);
            debug!("Variables: {}", variables);
        }

        let mut retries = 0;
        loop {
            let result = match self.sign(query, &variables) {
                Ok(request) => self.execute(&request).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(data) => return Ok(data),
                Err(e) if self.retry_policy.should_retry(&e, retries) => {
                    retries += 1;
                    warn!(
                        "Retrying request (attempt {}/{}): {}",
                        retries,
                        self.retry_policy.max_retries(),
                        e
                    );
                    sleep(self.retry_policy.delay_for(retries)).await;
                }
                Err(e) => {
                    if matches!(e.kind(), ErrorKind::Network | ErrorKind::Unexpected) {
                        error!("{}", e);
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Build a freshly timestamped and signed request
    fn sign(&self, query: &str, variables: &Value) -> Result<SignedRequest> {
        let body = serde_json::to_string(&json!({
            "query": query,
            "variables": variables,
        }))?;
        let timestamp = timestamp_now();
        let signature = self.credentials.sign(&timestamp, &body)?;

        Ok(SignedRequest {
            timestamp,
            api_key: self.credentials.api_key().to_string(),
            signature,
            body,
        })
    }

    /// One attempt: dispatch and classify
    async fn execute(&self, request: &SignedRequest) -> Result<GraphQLData> {
        if self.config.debug {
            debug!("Request headers: {:?}", request.headers());
            debug!("Request body: {}", request.body);
        }

        let response = self.transport.post(request).await?;

        if self.config.debug {
            debug!("Response status: {}", response.status);
            debug!("Response body: {}", String::from_utf8_lossy(&response.body));
        }

        classify(response.status, &response.body)
    }
}
