//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use crate::error::{AppError, NOT_FOUND_MESSAGE};
use crate::state::AppState;

/// Redirects a short token to its original URL.
///
/// # Endpoint
///
/// `GET /{shortened}`
///
/// Answers with 301 Moved Permanently and the stored URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found for unknown tokens and for storage failures alike.
/// Returns 500 if the stored URL cannot be sent as a header value.
pub async fn redirect_handler(
    Path(shortened): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state
        .link_service
        .resolve(&shortened)
        .await
        .map_err(|e| {
            if !e.is_not_found() {
                tracing::error!(error = %e, shortened = %shortened, "Lookup failed");
            }
            AppError::not_found(NOT_FOUND_MESSAGE)
        })?;

    let location = HeaderValue::try_from(original_url.as_str()).map_err(|_| {
        AppError::internal(format!(
            "Stored URL for '{}' is not a valid Location header",
            shortened
        ))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}
