//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns database health and connection-pool counters.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers 200 OK; an unreachable database is reported in the body
/// as `"status": "down"` and the service keeps serving.
///
/// # Response
///
/// ```json
/// {
///   "status": "up",
///   "message": "It's healthy",
///   "open_connections": 1,
///   "in_use": 0,
///   "idle": 1,
///   "wait_count": 0,
///   "wait_duration": "0ns",
///   "max_idle_closed": 0,
///   "max_lifetime_closed": 0
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.link_service.health().await.into())
}
