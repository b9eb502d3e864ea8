//! HTTPS serving with ACME-provisioned certificates
//!
//! Runs the TLS listener, the HTTP-01 challenge listener and the ACME event
//! loop together. When any of them stops, or a shutdown signal arrives, the
//! listeners are shut down as a unit.

use super::mode::AcmeSettings;
use super::shutdown_signal;
use anyhow::Context;
use axum::{http::Uri, response::Redirect, Router};
use axum_server::Handle;
use futures_util::StreamExt;
use rustls_acme::{caches::DirCache, AcmeConfig, UseChallenge};
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};

/// Time in-flight requests get to finish on shutdown
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

const CHALLENGE_PATH: &str = "/.well-known/acme-challenge/{challenge_token}";

/// Serve `router` over HTTPS until shutdown
pub async fn serve(settings: AcmeSettings, router: Router) -> anyhow::Result<()> {
    let mut state = AcmeConfig::new([settings.domain.as_str()])
        .contact(settings.contact.iter())
        .cache(DirCache::new(settings.cache_dir.clone()))
        .directory_lets_encrypt(!settings.staging)
        .challenge_type(UseChallenge::Http01)
        .state();

    let acceptor = state.axum_acceptor(state.default_rustls_config());
    let challenge_service = state.http01_challenge_tower_service();

    let challenge_router = redirect_router(settings.domain.clone(), settings.https_addr.port())
        .route_service(CHALLENGE_PATH, challenge_service);

    let https_handle = Handle::new();
    let http_handle = Handle::new();

    let mut listeners: JoinSet<anyhow::Result<()>> = JoinSet::new();

    tracing::info!(addr = %settings.http_addr, "Starting the letsencrypt server");
    let http = axum_server::bind(settings.http_addr)
        .handle(http_handle.clone())
        .serve(challenge_router.into_make_service());
    listeners.spawn(async move { http.await.context("ACME challenge listener failed") });

    tracing::info!(
        addr = %settings.https_addr,
        domain = %settings.domain,
        staging = settings.staging,
        "Starting the main TLS server"
    );
    let https = axum_server::bind(settings.https_addr)
        .acceptor(acceptor)
        .handle(https_handle.clone())
        .serve(router.into_make_service());
    listeners.spawn(async move { https.await.context("TLS listener failed") });

    let mut events = tokio::spawn(async move {
        while let Some(event) = state.next().await {
            match event {
                Ok(ok) => tracing::info!(event = ?ok, "ACME event"),
                Err(err) => tracing::error!(error = ?err, "ACME error"),
            }
        }
    });

    let mut result = tokio::select! {
        Some(joined) = listeners.join_next() => {
            tracing::error!("Listener stopped, shutting down");
            flatten(joined)
        }
        _ = &mut events => Err(anyhow::anyhow!("ACME event stream ended")),
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            Ok(())
        }
    };

    https_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    http_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
    events.abort();

    while let Some(joined) = listeners.join_next().await {
        if let Err(e) = flatten(joined) {
            tracing::error!(error = %e, "Listener failed during shutdown");
            if result.is_ok() {
                result = Err(e);
            }
        }
    }

    result
}

fn flatten(joined: Result<anyhow::Result<()>, JoinError>) -> anyhow::Result<()> {
    joined.context("Listener task panicked")?
}

/// Plain-HTTP router sending every request to the TLS listener
fn redirect_router(domain: String, https_port: u16) -> Router {
    Router::new().fallback(move |uri: Uri| {
        let location = https_location(&domain, https_port, &uri);
        async move { Redirect::permanent(&location) }
    })
}

/// Redirect target on the TLS listener for a plain-HTTP request
fn https_location(domain: &str, https_port: u16, uri: &Uri) -> String {
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    if https_port == 443 {
        format!("https://{}{}", domain, path)
    } else {
        format!("https://{}:{}{}", domain, https_port, path)
    }
}
