//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`      - Create short link
//! - `GET  /{shortened}`  - Short link redirect
//! - `GET  /health`       - Database health check
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Server header** - `server: tinylink` on every response
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{server_header, tracing};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization. Used directly by integration tests.
pub fn router(state: AppState) -> Router {
    api::routes::routes()
        .with_state(state)
        .layer(server_header::layer())
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] wrapped so that trailing
/// slashes are trimmed before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
