//! HTTP server
//!
//! Routes, shared state and the listener bootstrap

mod acme;
mod error;
pub mod handlers;
mod mode;

pub use error::ApiError;
pub use mode::{AcmeSettings, ListenMode};

use crate::quote::TickerStore;
use crate::upstream::QuoteProvider;
use axum::{
    extract::Request,
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::Span;
use uuid::Uuid;

/// Application state shared across handlers
pub struct AppState {
    pub provider: Arc<dyn QuoteProvider>,
    pub tickers: TickerStore,
}

impl AppState {
    pub fn new(provider: Arc<dyn QuoteProvider>, tickers: TickerStore) -> Self {
        AppState { provider, tickers }
    }
}

/// Create the HTTP router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(handlers::welcome))
        .route("/quote", get(handlers::quote).post(handlers::quote))
        .route("/api/v1/quote", get(handlers::quote).post(handlers::quote))
        .fallback(handlers::welcome)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(state)
}

fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %Uuid::new_v4(),
    )
}

/// Serve `router` in the given mode until shutdown
pub async fn run(mode: ListenMode, router: Router) -> anyhow::Result<()> {
    match mode {
        ListenMode::Plain { addr } => serve_plain(addr, router).await,
        ListenMode::Acme(settings) => acme::serve(settings, router).await,
    }
}

async fn serve_plain(addr: SocketAddr, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Starting plain HTTP server (testing mode)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
