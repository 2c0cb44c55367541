//! Authentication utilities for the OrionX API
//!
//! Implements the HMAC-SHA512 request signature. The signed message is the
//! timestamp header value immediately followed by the raw JSON body.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::fmt;

use crate::error::{OrionxError, Result};

type HmacSha512 = Hmac<Sha512>;

/// Default GraphQL endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api2.orionx.io/graphql";

/// Generate the HMAC-SHA512 signature for a request
///
/// Returns the lowercase hex digest of `timestamp + body` keyed by the secret.
///
/// # Example
///
/// ```
/// use orionx::api::auth::sign_request;
///
/// let signature = sign_request("1700000000.123456", r#"{"query":"{ me { _id } }","variables":{}}"#, "secret").unwrap();
/// assert_eq!(signature.len(), 128);
/// ```
pub fn sign_request(timestamp: &str, body: &str, secret: &str) -> Result<String> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .map_err(|e| OrionxError::Unexpected(format!("Unexpected error: {}", e)))?;
    mac.update(timestamp.as_bytes());
    mac.update(body.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    tracing::debug!("Generated signature for timestamp {}", timestamp);
    Ok(signature)
}

/// Verify a signature against the expected value
pub fn verify_signature(timestamp: &str, body: &str, secret: &str, signature: &str) -> bool {
    match sign_request(timestamp, body, secret) {
        Ok(computed) => constant_time_eq(computed.as_bytes(), signature.as_bytes()),
        Err(_) => false,
    }
}

/// Constant-time byte comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

/// Current wall-clock time as fractional seconds since the epoch
///
/// Always rendered with six decimal places, e.g. `1700000000.123456`.
pub fn timestamp_now() -> String {
    let now = Utc::now();
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

/// API credentials and the endpoint they are valid for
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
    api_endpoint: String,
}

impl Credentials {
    /// Create credentials for the default endpoint
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
        }
    }

    /// Point the credentials at a different endpoint
    pub fn with_endpoint(mut self, api_endpoint: impl Into<String>) -> Self {
        self.api_endpoint = api_endpoint.into();
        self
    }

    /// Create credentials from environment variables
    ///
    /// Looks for `ORIONX_API_KEY` and `ORIONX_API_SECRET`, plus an optional
    /// `ORIONX_API_ENDPOINT`.
    pub fn from_env() -> std::result::Result<Self, std::env::VarError> {
        let api_key = std::env::var("ORIONX_API_KEY")?;
        let api_secret = std::env::var("ORIONX_API_SECRET")?;
        let credentials = Self::new(api_key, api_secret);
        Ok(match std::env::var("ORIONX_API_ENDPOINT") {
            Ok(endpoint) if !endpoint.is_empty() => credentials.with_endpoint(endpoint),
            _ => credentials,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }

    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Check that key, secret and endpoint are all present
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(OrionxError::Authentication(
                "API key is required".to_string(),
            ));
        }
        if self.api_secret.is_empty() {
            return Err(OrionxError::Authentication(
                "API secret is required".to_string(),
            ));
        }
        if self.api_endpoint.is_empty() {
            return Err(OrionxError::Validation(
                "API endpoint is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Sign a request body with a given timestamp
    pub fn sign(&self, timestamp: &str, body: &str) -> Result<String> {
        sign_request(timestamp, body, &self.api_secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .field("api_endpoint", &self.api_endpoint)
            .finish()
    }
}
