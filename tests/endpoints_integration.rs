//! Endpoint views over HTTP

mod common;

use common::*;
use orionx::{ErrorKind, LimitOrder, OrderFilter, PingStatus};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_ping_ok() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("sdk_getMe"))
        .respond_with(SignatureCheck(json!({"me": {"_id": "u1", "email": "me@example.com"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    assert_eq!(
        client.ping().await,
        PingStatus::Ok("Connection successful".into())
    );
}

#[tokio::test]
async fn test_ping_reports_401() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server, fast_config()).ping().await;
    assert!(!status.is_ok());
    assert_eq!(status.message(), "Authentication failed: Invalid API credentials");
}

#[tokio::test]
async fn test_markets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("sdk_markets"))
        .respond_with(data(json!({"markets": [
            {"code": "BTCCLP", "name": "Bitcoin"},
            {"code": "ETHCLP", "name": "Ether"}
        ]})))
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let markets = assert_ok!(client.markets().get_markets().await).unwrap();
    assert_eq!(markets.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_market_stats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"code": "BTCCLP"}})))
        .respond_with(data(json!({"market": {
            "code": "BTCCLP",
            "name": "Bitcoin",
            "mainCurrency": {"code": "BTC"},
            "secondaryCurrency": {"code": "CLP"},
            "lastTrade": {"price": 100}
        }})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"marketCode": "BTCCLP", "limit": 1}})))
        .respond_with(data(json!({"marketOrderBook": {
            "buy": [{"amount": 5, "limitPrice": 98}],
            "sell": [{"amount": 3, "limitPrice": 102}],
            "spread": 4,
            "mid": 100
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let stats = assert_ok!(client.markets().get_market_stats("BTCCLP").await).unwrap();
    assert_eq!(stats.best_bid, Some(98.0));
    assert_eq!(stats.best_ask, Some(102.0));
    assert_eq!(stats.mid_price, Some(100.0));
    assert_eq!(stats.secondary_currency.as_deref(), Some("CLP"));
}

#[tokio::test]
async fn test_balances() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("sdk_getAccounts"))
        .respond_with(data(json!({"me": {"wallets": [
            {"_id": "w1", "currency": {"code": "BTC"}, "balance": 10, "availableBalance": 7},
            {"_id": "w2", "currency": {"code": "CLP"}, "balance": 5000, "availableBalance": 5000}
        ]}})))
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let balances = assert_ok!(client.accounts().get_balances().await);
    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].currency.as_deref(), Some("BTC"));
    assert_eq!(balances[0].available_balance, Some(7));
}

#[tokio::test]
async fn test_place_limit_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {
            "marketCode": "BTCCLP",
            "amount": 1000,
            "limitPrice": 50000000,
            "sell": true,
            "clientId": "bot-1"
        }})))
        .respond_with(data(json!({"placeLimitOrder": {"_id": "o1", "status": "PENDING"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let order = LimitOrder::sell("BTCCLP", 1000, 50_000_000).with_client_id("bot-1");
    let placed = assert_ok!(client.orders().place_limit_order(&order).await).unwrap();
    assert_eq!(placed["_id"], "o1");
}

#[tokio::test]
async fn test_open_orders() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"marketCode": "ETHCLP", "onlyOpen": true}})))
        .respond_with(data(json!({"orders": {"_id": "page", "items": [{"status": "OPEN"}]}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());
    let orders = assert_ok!(client.orders().get_orders(&OrderFilter::open("ETHCLP")).await).unwrap();
    assert_eq!(orders["items"][0]["status"], "OPEN");
}

#[tokio::test]
async fn test_validation_errors_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(data(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, fast_config());

    let err = client.orders().cancel_order("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.markets().get_orderbook("BTCCLP", 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client
        .orders()
        .place_limit_order(&LimitOrder::buy("BTCCLP", 10, 0))
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Limit price must be positive");

    let err = client.api().call("query { me { _id } }", json!([1])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
