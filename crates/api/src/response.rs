//! Response envelope shared by every print-request endpoint.
//!
//! Success and error bodies both take the form
//! `{ "data": ..., "message": ..., "http_status": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Message carried by every successful envelope.
pub const SUCCESS_MESSAGE: &str = "success";

/// Standard `{ data, message, http_status }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Envelope::success(records))
/// ```
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub message: String,
    pub http_status: u16,
}

impl<T: Serialize> Envelope<T> {
    /// A 200 envelope around `data`.
    pub fn success(data: T) -> Self {
        Self {
            data,
            message: SUCCESS_MESSAGE.to_string(),
            http_status: StatusCode::OK.as_u16(),
        }
    }
}

impl Envelope<()> {
    /// An envelope with `null` data, used for errors.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data: (),
            message: message.into(),
            http_status: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
