//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::time::Duration;

use orionx::api::verify_signature;
use orionx::{ClientConfig, Credentials, OrionxClient};
use serde_json::{json, Value};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const API_KEY: &str = "test-key";
pub const API_SECRET: &str = "test-secret";
pub const GRAPHQL_PATH: &str = "/graphql";

pub fn endpoint(server: &MockServer) -> String {
    format!("{}{}", server.uri(), GRAPHQL_PATH)
}

/// Short backoff and timeout so retry tests stay fast
pub fn fast_config() -> ClientConfig {
    ClientConfig::default()
        .with_timeout(Duration::from_secs(5))
        .with_backoff_unit(Duration::from_millis(10))
}

pub fn client_for(server: &MockServer, config: ClientConfig) -> OrionxClient {
    let credentials = Credentials::new(API_KEY, API_SECRET).with_endpoint(endpoint(server));
    OrionxClient::new(credentials, config).expect("client should build")
}

pub fn data(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": body }))
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Answers 401 unless the request carries a valid signature for [`API_SECRET`]
pub struct SignatureCheck(pub Value);

impl Respond for SignatureCheck {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        let signed = match (
            header(request, "X-ORIONX-TIMESTAMP"),
            header(request, "X-ORIONX-SIGNATURE"),
            header(request, "X-ORIONX-APIKEY"),
        ) {
            (Some(timestamp), Some(signature), Some(API_KEY)) => {
                verify_signature(timestamp, &body, API_SECRET, signature)
            }
            _ => false,
        };

        if signed {
            data(self.0.clone())
        } else {
            ResponseTemplate::new(401)
        }
    }
}
