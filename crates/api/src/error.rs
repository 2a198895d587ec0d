use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use threedee_core::error::CoreError;

use crate::normalizer::NormalizeError;
use crate::response::Envelope;

/// Message sent to clients in place of internal failure details.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the standard envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `threedee_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any store failure. Never distinguished by cause.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be turned into the expected record.
    #[error(transparent)]
    Decode(#[from] NormalizeError),

    /// A bad request with a human-readable message.
    #[error("{0}")]
    BadRequest(String),

    /// The request was cancelled before the handler did any work.
    #[error("request cancelled")]
    RequestCancelled,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Full error text attached to error responses for the request logger.
///
/// Unlike the response body, this is never sanitized.
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

impl AppError {
    /// HTTP status and client-facing message.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } | CoreError::Empty { .. } => {
                    (StatusCode::NOT_FOUND, core.to_string())
                }
                CoreError::NotEditable { .. } => (StatusCode::BAD_REQUEST, core.to_string()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::Decode(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::RequestCancelled => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let mut response = Envelope::error(status, message).into_response();
        response
            .extensions_mut()
            .insert(ErrorMessage(self.to_string()));
        response
    }
}
