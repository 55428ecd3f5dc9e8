//! API route configuration.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All service routes.
///
/// # Endpoints
///
/// - `POST /shorten`      - Create a short token for a URL
/// - `GET  /health`       - Database health and pool counters
/// - `GET  /{shortened}`  - Redirect a token to its original URL
///
/// Static segments take priority over `/{shortened}`, so `health` and
/// `shorten` are never treated as tokens.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{shortened}", get(redirect_handler))
}
