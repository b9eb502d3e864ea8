//! Shared fixtures: a scripted provider and a fake Finnhub server

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::Query,
    http::{HeaderMap, Method, Request, StatusCode},
    routing::get,
    Router,
};
use quote_relay::quote::{Quote, Ticker, TickerStore};
use quote_relay::server::{create_router, AppState};
use quote_relay::upstream::{QuoteProvider, UpstreamError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Provider returning a fixed answer and recording every ticker it sees
pub struct ScriptedProvider {
    pub calls: Mutex<Vec<String>>,
    error: Option<String>,
    price: f64,
}

impl ScriptedProvider {
    pub fn price(price: f64) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            error: None,
            price,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            error: Some(message.to_string()),
            price: 0.0,
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn fetch_quote(&self, ticker: &Ticker) -> Result<Quote, UpstreamError> {
        self.calls.lock().unwrap().push(ticker.to_string());
        match &self.error {
            Some(message) => Err(UpstreamError::Provider(message.clone())),
            None => Ok(Quote::new(ticker, self.price)),
        }
    }
}

/// Router over `provider` with "AMZN" as the starting default ticker
pub fn app_with(provider: Arc<dyn QuoteProvider>) -> Router {
    let tickers = TickerStore::new(Ticker::parse("AMZN").unwrap());
    create_router(Arc::new(AppState::new(provider, tickers)))
}

/// Send one request through the router
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body)
}

/// Query strings received by the fake upstream
pub type Received = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Start a fake Finnhub answering `/api/v1/quote` with `status` and `body`.
///
/// Returns the base URL to configure and the recorded queries.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let recorder = received.clone();

    let app = Router::new().route(
        "/api/v1/quote",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(params);
                (status, [("content-type", "application/json")], body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api/v1", addr), received)
}
