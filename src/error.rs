//! OrionX error types
//!
//! Every failure surfaced by the client is one of six kinds. The variant
//! carries the original message text so callers can log or display it
//! without losing diagnostics.

use thiserror::Error;

/// Error category, used for matching and retry eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Authentication,
    RateLimit,
    Api,
    Network,
    Unexpected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrionxError {
    /// Malformed or missing caller-supplied parameters
    #[error("{0}")]
    Validation(String),

    /// Missing or rejected credentials (including HTTP 401)
    #[error("{0}")]
    Authentication(String),

    /// HTTP 429
    #[error("{0}")]
    RateLimit(String),

    /// Server-side or protocol-level failure. `status` is set when the error
    /// came from a non-200 HTTP status.
    #[error("{message}")]
    Api { status: Option<u16>, message: String },

    /// Transport timeout or connection failure
    #[error("{0}")]
    Network(String),

    /// Anything not classified above
    #[error("{0}")]
    Unexpected(String),
}

impl OrionxError {
    /// API error not tied to an HTTP status (GraphQL errors, bad JSON)
    pub fn api(message: impl Into<String>) -> Self {
        OrionxError::Api {
            status: None,
            message: message.into(),
        }
    }

    /// API error produced by a non-200 HTTP status
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        OrionxError::Api {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrionxError::Validation(_) => ErrorKind::Validation,
            OrionxError::Authentication(_) => ErrorKind::Authentication,
            OrionxError::RateLimit(_) => ErrorKind::RateLimit,
            OrionxError::Api { .. } => ErrorKind::Api,
            OrionxError::Network(_) => ErrorKind::Network,
            OrionxError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// The message text carried by the error
    pub fn message(&self) -> &str {
        match self {
            OrionxError::Validation(msg)
            | OrionxError::Authentication(msg)
            | OrionxError::RateLimit(msg)
            | OrionxError::Network(msg)
            | OrionxError::Unexpected(msg) => msg,
            OrionxError::Api { message, .. } => message,
        }
    }

    /// HTTP status behind an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            OrionxError::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// True for the HTTP 500 flavour of API error
    pub fn is_server_error(&self) -> bool {
        matches!(self, OrionxError::Api { status: Some(500), .. })
    }
}

impl From<reqwest::Error> for OrionxError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OrionxError::Network(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            OrionxError::Network(format!("Connection failed: {}", err))
        } else {
            OrionxError::Unexpected(format!("Unexpected error: {}", err))
        }
    }
}

impl From<serde_json::Error> for OrionxError {
    fn from(err: serde_json::Error) -> Self {
        OrionxError::Unexpected(format!("Unexpected error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, OrionxError>;
