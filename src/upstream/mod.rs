//! Upstream quote provider
//!
//! Fetches closing prices from the Finnhub REST API

mod finnhub;
mod types;

pub use finnhub::{FinnhubClient, FinnhubConfig};
pub use types::{UpstreamError, UpstreamQuote};

use crate::quote::{Quote, Ticker};
use async_trait::async_trait;

/// Trait for quote provider implementations
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the latest closing price for one ticker
    async fn fetch_quote(&self, ticker: &Ticker) -> Result<Quote, UpstreamError>;
}
