//! Finnhub API client
//!
//! Issues one `GET /quote?symbol=..&token=..` per lookup. No retries and no
//! rate limiting; a failed lookup is reported to the caller as-is.

use super::{QuoteProvider, UpstreamError, UpstreamQuote};
use crate::config::{UpstreamConfig, FINNHUB_API_URL};
use crate::quote::{Quote, Ticker};
use crate::telemetry;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

/// Longest upstream body echoed back in a status error
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Configuration for the Finnhub client
#[derive(Debug, Clone)]
pub struct FinnhubConfig {
    /// Base URL for the Finnhub API
    pub base_url: String,
    /// API token sent with every request
    pub api_key: String,
    /// Request timeout; reqwest's default when `None`
    pub timeout: Option<Duration>,
}

impl Default for FinnhubConfig {
    fn default() -> Self {
        Self {
            base_url: FINNHUB_API_URL.to_string(),
            api_key: String::new(),
            timeout: None,
        }
    }
}

impl From<&UpstreamConfig> for FinnhubConfig {
    fn from(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Client for Finnhub's quote endpoint
pub struct FinnhubClient {
    config: FinnhubConfig,
    client: Client,
}

impl FinnhubClient {
    /// Create a new client with the given configuration
    pub fn new(config: FinnhubConfig) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// URL of the quote endpoint, without query parameters
    fn quote_url(&self) -> String {
        format!("{}/quote", self.config.base_url.trim_end_matches('/'))
    }

    /// Map a decoded payload onto our quote type
    fn convert_to_quote(ticker: &Ticker, payload: UpstreamQuote) -> Result<Quote, UpstreamError> {
        if let Some(message) = payload.error {
            return Err(UpstreamError::Provider(message));
        }

        tracing::debug!(
            ticker = %ticker,
            close = payload.close,
            quoted_at = ?payload.quoted_at(),
            "Received upstream quote"
        );

        Ok(Quote::new(ticker, payload.close))
    }

    async fn request(&self, ticker: &Ticker) -> Result<Quote, UpstreamError> {
        let url = self.quote_url();

        tracing::info!(url = %url, symbol = %ticker, "Requesting quote");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", ticker.as_str()),
                ("token", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| UpstreamError::transport(ticker, source))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::transport(ticker, source))?;

        let payload: UpstreamQuote = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(_) if !status.is_success() => {
                let body: String = String::from_utf8_lossy(&body)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect();
                return Err(UpstreamError::Status { status, body });
            }
            Err(e) => return Err(UpstreamError::Decode(e)),
        };

        Self::convert_to_quote(ticker, payload)
    }
}

#[async_trait]
impl QuoteProvider for FinnhubClient {
    async fn fetch_quote(&self, ticker: &Ticker) -> Result<Quote, UpstreamError> {
        let started = Instant::now();
        let result = self.request(ticker).await;
        telemetry::record_upstream_latency(started.elapsed());

        if let Err(ref e) = result {
            tracing::warn!(ticker = %ticker, error = %e, "Failed to get stock quote");
        }

        result
    }
}
