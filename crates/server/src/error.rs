//! Unified error handling for the catalog API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::response::Envelope;

/// Application-level error type for the catalog API.
///
/// The taxonomy is deliberately flat: every failure a handler can surface
/// maps onto one of these variants and a single status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request field failed validation.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness conflict (e.g., duplicate name). Kept at 400 to preserve
    /// the observed wire contract.
    #[error("{0}")]
    Conflict(String),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Missing credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Invalid credentials.
    #[error("{0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(RepositoryError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::NotFound => Self::NotFound("Resource not found.".to_string()),
            other => Self::Database(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Catalog request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::Conflict(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error.".to_string(),
            _ => self.to_string(),
        };

        (status, Json(Envelope::<()>::error(message))).into_response()
    }
}
