//! Wire types for the quote endpoint

use super::Ticker;
use serde::{Deserialize, Serialize};

/// Body accepted by the quote endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuoteRequest {
    /// Optional ticker override
    #[serde(default)]
    pub ticker: Option<String>,
}

impl QuoteRequest {
    /// Decode a request body. An empty body is a request without a ticker.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    /// The requested ticker, if a non-blank one was supplied
    pub fn ticker(&self) -> Option<Ticker> {
        self.ticker.as_deref().and_then(Ticker::parse)
    }
}

/// Quote returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub ticker: String,
    pub price: f64,
}

impl Quote {
    pub fn new(ticker: &Ticker, price: f64) -> Self {
        Self {
            ticker: ticker.to_string(),
            price,
        }
    }
}

/// Error body returned on the failure path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
