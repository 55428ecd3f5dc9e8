//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "shortened": "1b4e28ba" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body is not valid JSON for the request shape.
/// Returns 500 Internal Server Error if the store fails.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;

    let created = state.link_service.create_short_url(payload.url).await?;

    Ok(Json(ShortenResponse {
        shortened: created.short_url,
    }))
}
