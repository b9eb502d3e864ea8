//! quote-relay: HTTP relay for stock quotes
//!
//! This library provides the components for:
//! - The quote and welcome HTTP endpoints
//! - A Finnhub client for closing prices
//! - Automatic TLS via ACME (Let's Encrypt)
//! - Configuration from TOML, flags and environment
//! - Logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod quote;
pub mod server;
pub mod telemetry;
pub mod upstream;
