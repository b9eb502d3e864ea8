//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

const QUOTE_REQUESTS: &str = "quote_relay_quote_requests_total";
const UPSTREAM_LATENCY: &str = "quote_relay_upstream_latency_seconds";

/// How a quote request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    /// Quote returned
    Ok,
    /// Upstream lookup failed
    UpstreamError,
    /// Request body could not be decoded
    BadRequest,
}

impl QuoteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteOutcome::Ok => "ok",
            QuoteOutcome::UpstreamError => "upstream_error",
            QuoteOutcome::BadRequest => "bad_request",
        }
    }
}

/// Start the Prometheus scrape endpoint on the given port
pub fn install_exporter(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    metrics::describe_counter!(QUOTE_REQUESTS, "Quote requests by outcome");
    metrics::describe_histogram!(
        UPSTREAM_LATENCY,
        metrics::Unit::Seconds,
        "Latency of upstream quote lookups"
    );

    tracing::info!(%addr, "Metrics exporter listening");
    Ok(())
}

/// Count a finished quote request
pub fn record_quote_outcome(outcome: QuoteOutcome) {
    metrics::counter!(QUOTE_REQUESTS, "outcome" => outcome.as_str()).increment(1);
}

/// Record the duration of one upstream lookup
pub fn record_upstream_latency(duration: Duration) {
    metrics::histogram!(UPSTREAM_LATENCY).record(duration.as_secs_f64());
}
