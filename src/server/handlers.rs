use axum::{
    body::Bytes,
    extract::State,
    http::Method,
    Json,
};
use std::sync::Arc;

use super::{AppState, ApiError};
use crate::quote::{Quote, QuoteRequest, Ticker};
use crate::telemetry::{self, QuoteOutcome};

/// Body of the root endpoint
pub const WELCOME_MESSAGE: &str = "Welcome to Bret's API!\n";

/// ANY / (and unmatched paths)
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// GET|POST /quote, /api/v1/quote
///
/// A POSTed ticker becomes the default for later requests that omit one.
/// Other methods use a supplied ticker for this request only.
pub async fn quote(
    method: Method,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Quote>, ApiError> {
    tracing::info!(%method, "Quote request");

    let request = QuoteRequest::from_body(&body).map_err(|e| {
        let err = ApiError::invalid_body(e);
        tracing::error!(error = %err, "Failed to decode quote request");
        telemetry::record_quote_outcome(QuoteOutcome::BadRequest);
        err
    })?;

    let ticker = resolve_ticker(&state, &method, &request).await;

    match state.provider.fetch_quote(&ticker).await {
        Ok(quote) => {
            tracing::info!(ticker = %quote.ticker, price = quote.price, "Stock quote");
            telemetry::record_quote_outcome(QuoteOutcome::Ok);
            Ok(Json(quote))
        }
        Err(e) => {
            let err = ApiError::from(e);
            tracing::info!(error = %err, "Quote unavailable");
            telemetry::record_quote_outcome(QuoteOutcome::UpstreamError);
            Err(err)
        }
    }
}

async fn resolve_ticker(state: &AppState, method: &Method, request: &QuoteRequest) -> Ticker {
    match request.ticker() {
        Some(ticker) if *method == Method::POST => {
            state.tickers.replace(ticker.clone()).await;
            ticker
        }
        Some(ticker) => ticker,
        None => {
            let ticker = state.tickers.current().await;
            tracing::info!(ticker = %ticker, "Empty ticker in request, using default");
            ticker
        }
    }
}
