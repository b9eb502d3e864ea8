//! Quote domain types
//!
//! Inbound request, outbound quote, and the ticker handling shared by the
//! HTTP layer and the upstream client.

mod ticker;
mod types;

pub use ticker::{Ticker, TickerStore};
pub use types::{ErrorResponse, Quote, QuoteRequest};
