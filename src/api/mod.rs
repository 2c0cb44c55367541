//! OrionX GraphQL API core
//!
//! # Modules
//!
//! - [`auth`]: HMAC-SHA512 request signing and credentials
//! - [`transport`]: HTTP dispatch behind the [`Transport`] trait
//! - [`response`]: status and GraphQL envelope classification
//! - [`retry`]: retry eligibility and exponential backoff
//! - [`client`]: the request executor tying the above together

pub mod auth;
pub mod client;
pub mod response;
pub mod retry;
pub mod transport;

pub use auth::{sign_request, verify_signature, Credentials, DEFAULT_API_ENDPOINT};
pub use client::{ClientConfig, RequestExecutor};
pub use response::{classify, GraphQLData, GraphQLError, GraphQLResult};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, RawResponse, SignedRequest, Transport};
