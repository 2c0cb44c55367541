//! OrionX API client
//!
//! Credentialed GraphQL access to the OrionX exchange. Every request is
//! signed with HMAC-SHA512 over `timestamp + body`, sent with the
//! `X-ORIONX-*` headers, and its response is classified into data or a
//! typed [`OrionxError`]. Rate-limited and HTTP 500 responses are retried
//! with exponential backoff; network failures never are.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod types;

pub use api::{ClientConfig, Credentials, RequestExecutor, Transport};
pub use client::{OrionxClient, PingStatus};
pub use config::Config;
pub use error::{ErrorKind, OrionxError, Result};
pub use types::*;
