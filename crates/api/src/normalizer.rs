//! Request body normalization.
//!
//! Handlers take the raw body as `Result<Bytes, BytesRejection>` and hand it
//! to [`normalize`] only once the cheaper checks (cancellation, path id)
//! have passed. The `Content-Type` header is not inspected, and no
//! field-level validation happens here: any JSON object matching the
//! record shape is accepted.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("failed to read request body")]
    Read(#[source] BytesRejection),

    #[error("failed to decode request body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request body must be a JSON object")]
    NotAnObject,
}

/// Parse a request body into `T`.
pub fn normalize<T: DeserializeOwned>(
    body: Result<Bytes, BytesRejection>,
) -> Result<T, NormalizeError> {
    let bytes = body.map_err(NormalizeError::Read)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if !value.is_object() {
        return Err(NormalizeError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}
