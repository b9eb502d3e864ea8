//! Serve command implementation

use crate::config::{Config, ConfigError};
use crate::quote::{Ticker, TickerStore};
use crate::server::{self, AppState, ListenMode};
use crate::upstream::{FinnhubClient, FinnhubConfig};
use std::sync::Arc;

/// Build the service from `config` and run it until shutdown
pub async fn execute(config: Config) -> anyhow::Result<()> {
    let mode = ListenMode::from_config(&config).inspect_err(|e| {
        tracing::error!(domain = ?config.acme.domain, "{}", e);
    })?;

    let default_ticker = Ticker::parse(&config.quote.default_ticker)
        .ok_or_else(|| ConfigError::InvalidDefaultTicker(config.quote.default_ticker.clone()))?;

    if config.upstream.api_key.is_empty() {
        tracing::warn!("No Finnhub API key configured; upstream requests will be rejected");
    }

    let provider = FinnhubClient::new(FinnhubConfig::from(&config.upstream))?;
    let state = Arc::new(AppState::new(
        Arc::new(provider),
        TickerStore::new(default_ticker),
    ));

    server::run(mode, server::create_router(state)).await
}
