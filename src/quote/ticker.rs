//! Ticker normalization and the sticky default ticker

use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Upper-cased, trimmed, non-empty ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize a raw symbol; `None` when it is blank
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ticker used for requests that do not name one.
///
/// POSTed tickers replace it for every later request. Clones share state.
#[derive(Debug, Clone)]
pub struct TickerStore {
    current: Arc<RwLock<Ticker>>,
}

impl TickerStore {
    pub fn new(initial: Ticker) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial)),
        }
    }

    /// Current default ticker
    pub async fn current(&self) -> Ticker {
        self.current.read().await.clone()
    }

    /// Replace the default ticker
    pub async fn replace(&self, ticker: Ticker) {
        let mut current = self.current.write().await;
        if *current != ticker {
            tracing::info!(previous = %*current, ticker = %ticker, "Default ticker changed");
        }
        *current = ticker;
    }
}
