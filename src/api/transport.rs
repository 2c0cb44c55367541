//! HTTP transport for signed GraphQL requests
//!
//! The executor talks to the network only through the [`Transport`] trait,
//! so the dispatch step can be swapped out (tests script it).

use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::{OrionxError, Result};

pub const HEADER_TIMESTAMP: &str = "X-ORIONX-TIMESTAMP";
pub const HEADER_API_KEY: &str = "X-ORIONX-APIKEY";
pub const HEADER_SIGNATURE: &str = "X-ORIONX-SIGNATURE";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A fully signed request, built fresh for every attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub timestamp: String,
    pub api_key: String,
    pub signature: String,
    pub body: String,
}

impl SignedRequest {
    /// Header name/value pairs sent with the request
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_API_KEY, self.api_key.as_str()),
            (HEADER_SIGNATURE, self.signature.as_str()),
            ("Content-Type", CONTENT_TYPE_JSON),
        ]
    }
}

/// Status and raw body bytes of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the signed request to the configured endpoint.
    ///
    /// Timeouts and connection failures must come back as
    /// [`OrionxError::Network`].
    async fn post(&self, request: &SignedRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport for a single endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            OrionxError::Validation(format!("Invalid API endpoint '{}': {}", endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &SignedRequest) -> Result<RawResponse> {
        let mut builder = self.client.post(self.endpoint.clone());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.body(request.body.clone()).send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok(RawResponse::new(status, bytes.to_vec()))
    }
}
