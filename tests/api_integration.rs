//! Request pipeline against a mock HTTP server
//!
//! Covers signing headers, status classification, retry counts and
//! network failures through the real reqwest transport.

mod common;

use std::time::Duration;

use common::*;
use orionx::api::{verify_signature, HttpTransport, RequestExecutor};
use orionx::{Credentials, ErrorKind, OrionxError};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY: &str = "query sdk_getUserId { me { _id } }";

#[tokio::test]
async fn test_signed_request_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header_exists("X-ORIONX-TIMESTAMP"))
        .and(header_exists("X-ORIONX-SIGNATURE"))
        .and(header("X-ORIONX-APIKEY", API_KEY))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({"query": QUERY, "variables": {}})))
        .respond_with(SignatureCheck(json!({"me": {"_id": "u1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let data = assert_ok!(client.api().call(QUERY, Value::Null).await);
    assert_eq!(data.get("me"), Some(&json!({"_id": "u1"})));
}

#[tokio::test]
async fn test_timestamp_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    assert_ok!(client.api().call(QUERY, json!({})).await);

    let requests = server.received_requests().await.unwrap();
    let timestamp = common::header(&requests[0], "X-ORIONX-TIMESTAMP").unwrap();
    let (secs, micros) = timestamp.split_once('.').unwrap();
    assert!(secs.parse::<u64>().is_ok());
    assert_eq!(micros.len(), 6);
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(SignatureCheck(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::new(API_KEY, "other-secret").with_endpoint(endpoint(&server));
    let api = RequestExecutor::new(credentials, fast_config()).unwrap();

    let err = api.call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.message(), "Authentication failed: Invalid API credentials");
}

#[tokio::test]
async fn test_rate_limit_retried_until_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config().with_max_retries(2));
    let err = client.api().call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err, OrionxError::RateLimit("Rate limit exceeded".into()));
}

#[tokio::test]
async fn test_retries_are_resigned_with_fresh_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config().with_max_retries(2));
    let err = client.api().call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);

    let timestamps: Vec<&str> = requests
        .iter()
        .map(|r| common::header(r, "X-ORIONX-TIMESTAMP").unwrap())
        .collect();
    let signatures: Vec<&str> = requests
        .iter()
        .map(|r| common::header(r, "X-ORIONX-SIGNATURE").unwrap())
        .collect();

    for i in 0..requests.len() {
        for j in (i + 1)..requests.len() {
            assert_ne!(timestamps[i], timestamps[j], "attempts {} and {} share a timestamp", i, j);
            assert_ne!(signatures[i], signatures[j], "attempts {} and {} share a signature", i, j);
        }
        let body = String::from_utf8_lossy(&requests[i].body);
        assert!(verify_signature(timestamps[i], &body, API_SECRET, signatures[i]));
    }
}

#[tokio::test]
async fn test_invalid_utf8_body_is_api_error() {
    let mut body = br#"{"data":{"name":""#.to_vec();
    body.push(0xFF);
    body.extend_from_slice(br#""}}"#);

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let err = client.api().call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert!(err.message().starts_with("Invalid JSON response: "));
}

#[tokio::test]
async fn test_server_error_recovers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(data(json!({"me": {"_id": "u1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let data = assert_ok!(client.api().call(QUERY, json!({})).await);
    assert_eq!(data["me"]["_id"], "u1");
}

#[tokio::test]
async fn test_other_statuses_not_retried() {
    for status in [400u16, 403, 502, 503] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, fast_config());
        let err = client.api().call(QUERY, json!({})).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), format!("HTTP {}: nope", status));
    }
}

#[tokio::test]
async fn test_partial_success_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"me": {"_id": "u1"}, "wallet": null},
            "errors": [{"message": "wallet not found"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let data = assert_ok!(client.api().call(QUERY, json!({})).await);
    assert_eq!(data["me"]["_id"], "u1");
}

#[tokio::test]
async fn test_graphql_failure_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "Unauthorized field"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let err = client.api().call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.message(), "GraphQL error: Unauthorized field");
}

#[tokio::test]
async fn test_timeout_is_network_error_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({})).set_delay(Duration::from_millis(500)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config().with_timeout(Duration::from_millis(100)));
    let err = client.api().call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().starts_with("Request timeout: "));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let credentials = Credentials::new(API_KEY, API_SECRET)
        .with_endpoint(format!("http://127.0.0.1:{}/graphql", port));
    let api = RequestExecutor::new(credentials, fast_config()).unwrap();

    let err = api.call(QUERY, json!({})).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(err.message().starts_with("Connection failed: "));
}

#[tokio::test]
async fn test_invalid_endpoint_rejected() {
    let credentials = Credentials::new(API_KEY, API_SECRET).with_endpoint("not a url");
    let err = RequestExecutor::<HttpTransport>::new(credentials, fast_config()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
