//! Upstream payload and error types

use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Finnhub `/quote` response body
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UpstreamQuote {
    /// Current / closing price
    #[serde(rename = "c", default)]
    pub close: f64,
    /// High price of the day
    #[serde(rename = "h", default)]
    pub high: f64,
    /// Low price of the day
    #[serde(rename = "l", default)]
    pub low: f64,
    /// Open price of the day
    #[serde(rename = "o", default)]
    pub open: f64,
    /// Previous close price
    #[serde(rename = "pc", default)]
    pub previous_close: f64,
    /// Quote time (unix seconds)
    #[serde(rename = "t", default)]
    pub timestamp: i64,
    /// Provider-reported failure
    #[serde(default)]
    pub error: Option<String>,
}

impl UpstreamQuote {
    /// Quote time, when the provider sent a usable one
    pub fn quoted_at(&self) -> Option<DateTime<Utc>> {
        if self.timestamp <= 0 {
            return None;
        }
        Utc.timestamp_opt(self.timestamp, 0).single()
    }
}

/// Upstream quote errors
///
/// Never carries the request URL: it holds the API token.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never produced a response
    #[error("Unable to retrieve ticker {ticker}: {source}")]
    Transport {
        ticker: String,
        #[source]
        source: reqwest::Error,
    },
    /// Non-2xx response that was not a quote payload
    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// 2xx response that was not a quote payload
    #[error("Malformed upstream response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The provider answered with an error message
    #[error("{0}")]
    Provider(String),
}

impl UpstreamError {
    /// Transport failure with the request URL stripped
    pub fn transport(ticker: impl ToString, source: reqwest::Error) -> Self {
        UpstreamError::Transport {
            ticker: ticker.to_string(),
            source: source.without_url(),
        }
    }
}
