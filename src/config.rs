//! Configuration types for quote-relay
//!
//! Every field has a default so the service can start without a config
//! file. CLI flags and environment variables are layered on top by
//! [`crate::cli::Cli::apply_overrides`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Finnhub REST API base URL
pub const FINNHUB_API_URL: &str = "https://finnhub.io/api/v1";

/// Ticker used until a client POSTs another one
pub const DEFAULT_TICKER: &str = "AMZN";

/// Startup configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// TLS mode needs a domain to request a certificate for
    #[error("Please set the domain via domain flag or set DOMAIN env var.")]
    MissingDomain,
    /// The ACME directory's terms of service must be accepted explicitly
    #[error("ACME terms of service not accepted (set acme.accept_tos = true)")]
    TermsNotAccepted,
    /// Configured default ticker is blank
    #[error("Invalid default ticker: {0:?}")]
    InvalidDefaultTicker(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub acme: AcmeConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Serve plain HTTP only and never request certificates
    #[serde(default)]
    pub testing: bool,

    /// Plain HTTP port used in test mode
    #[serde(default = "default_plain_port")]
    pub plain_port: u16,

    /// Port answering ACME HTTP-01 challenges
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// TLS port
    #[serde(default = "default_https_port")]
    pub https_port: u16,
}

fn default_plain_port() -> u16 {
    8080
}
fn default_http_port() -> u16 {
    80
}
fn default_https_port() -> u16 {
    443
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            testing: false,
            plain_port: 8080,
            http_port: 80,
            https_port: 443,
        }
    }
}

/// Certificate provisioning configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcmeConfig {
    /// The single domain certificates may be issued for
    #[serde(default)]
    pub domain: Option<String>,

    /// On-disk certificate and account cache
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Contact addresses, e.g. "mailto:ops@example.com"
    #[serde(default)]
    pub contact: Vec<String>,

    /// Use the Let's Encrypt staging directory (untrusted certificates)
    #[serde(default)]
    pub staging: bool,

    #[serde(default = "default_true")]
    pub accept_tos: bool,
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("certs")
}
fn default_true() -> bool {
    true
}

impl Default for AcmeConfig {
    fn default() -> Self {
        Self {
            domain: None,
            cache_dir: default_cache_dir(),
            contact: Vec::new(),
            staging: false,
            accept_tos: true,
        }
    }
}

/// Upstream quote provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    FINNHUB_API_URL.to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

/// Quote endpoint configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuoteConfig {
    #[serde(default = "default_ticker")]
    pub default_ticker: String,
}

fn default_ticker() -> String {
    DEFAULT_TICKER.to_string()
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            default_ticker: default_ticker(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format
    #[default]
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Copy suitable for printing: the API key is masked
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.upstream.api_key.is_empty() {
            config.upstream.api_key = "********".to_string();
        }
        config
    }
}
