//! End-to-end tests: router, Finnhub client and a fake upstream

use crate::support::{app_with, send, spawn_upstream};
use axum::http::{Method, StatusCode};
use quote_relay::config::Config;
use quote_relay::server::ListenMode;
use quote_relay::upstream::{FinnhubClient, FinnhubConfig};
use serde_json::{json, Value};
use std::sync::Arc;

fn finnhub(base_url: String) -> Arc<FinnhubClient> {
    Arc::new(
        FinnhubClient::new(FinnhubConfig {
            base_url,
            api_key: "test-key".to_string(),
            timeout: None,
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_quote_round_trip() {
    let (base_url, received) = spawn_upstream(StatusCode::OK, r#"{"c": 101.5}"#).await;
    let app = app_with(finnhub(base_url));

    let (status, _, body) = send(&app, Method::GET, "/api/v1/quote", "").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"ticker": "AMZN", "price": 101.5}));
    assert_eq!(received.lock().unwrap()[0]["symbol"], "AMZN");
}

#[tokio::test]
async fn test_requested_ticker_reaches_upstream_uppercased() {
    let (base_url, received) = spawn_upstream(StatusCode::OK, r#"{"c": 189.2}"#).await;
    let app = app_with(finnhub(base_url));

    for raw in ["aapl", "Goog", "BRK.b"] {
        let body = json!({ "ticker": raw }).to_string();
        let (status, _, _) = send(&app, Method::POST, "/quote", &body).await;
        assert_eq!(status, StatusCode::OK);
    }

    let symbols: Vec<String> = received
        .lock()
        .unwrap()
        .iter()
        .map(|q| q["symbol"].clone())
        .collect();
    assert_eq!(symbols, vec!["AAPL", "GOOG", "BRK.B"]);
}

#[tokio::test]
async fn test_upstream_error_round_trip() {
    let (base_url, _) = spawn_upstream(StatusCode::OK, r#"{"error": "symbol not found"}"#).await;
    let app = app_with(finnhub(base_url));

    let (status, _, body) = send(&app, Method::POST, "/api/v1/quote", r#"{"ticker": "zz"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"error": "symbol not found"}));
}

#[tokio::test]
async fn test_transport_failure_keeps_serving() {
    let app = app_with(finnhub("http://127.0.0.1:1/api/v1".to_string()));

    let (status, _, body) = send(&app, Method::GET, "/api/v1/quote", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("AMZN"));

    let (status, _, _) = send(&app, Method::GET, "/", "").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_transport_failure_response_hides_api_key() {
    let client = FinnhubClient::new(FinnhubConfig {
        base_url: "http://127.0.0.1:1/api/v1".to_string(),
        api_key: "SUPERSECRETKEY".to_string(),
        timeout: None,
    })
    .unwrap();
    let app = app_with(Arc::new(client));

    let (status, _, body) = send(&app, Method::GET, "/api/v1/quote", "").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("AMZN"), "{}", body);
    assert!(!body.contains("SUPERSECRETKEY"), "{}", body);
    assert!(!body.contains("token="), "{}", body);
}

#[test]
fn test_config_example_parses() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.quote.default_ticker, "AMZN");
    assert_eq!(config.server.plain_port, 8080);
}

#[test]
fn test_config_example_testing_mode_is_plain() {
    let mut config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.server.testing = true;

    assert!(matches!(
        ListenMode::from_config(&config),
        Ok(ListenMode::Plain { addr }) if addr.port() == 8080
    ));
}
