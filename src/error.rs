//! Application error type and its HTTP mapping.
//!
//! Every failure is rendered as `{"error": "<message>"}`. Storage-level
//! details are logged but never sent to the client.

use std::time::Duration;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Public message for any 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Public message for lookup misses.
pub const NOT_FOUND_MESSAGE: &str = "Not Found";

/// Public message for request bodies that could not be parsed.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true for a lookup miss, false for every other kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Timeout(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::bad_request(INVALID_JSON_MESSAGE)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::BadRequest { message } => message.as_str(),
            AppError::NotFound { .. } => NOT_FOUND_MESSAGE,
            AppError::Storage(_) | AppError::Timeout(_) | AppError::Internal { .. } => {
                tracing::error!(error = %self, "Request failed");
                INTERNAL_ERROR_MESSAGE
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message() {
        let response = AppError::bad_request(INVALID_JSON_MESSAGE).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid JSON");
    }

    #[tokio::test]
    async fn test_not_found_uses_generic_message() {
        let response = AppError::not_found("no row for token abc12345").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_storage_error_does_not_leak_details() {
        let response = AppError::from(sqlx::Error::PoolClosed).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Internal Server Error");
    }

    #[test]
    fn test_timeout_maps_to_500() {
        let err = AppError::Timeout(Duration::from_secs(5));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_not_found());
        assert!(AppError::not_found("x").is_not_found());
    }
}
