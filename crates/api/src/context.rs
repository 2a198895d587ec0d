//! Per-request cancellation context.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};

/// Cancellation signal for one request.
///
/// The request logger attaches one per request as a child of the server's
/// shutdown token. Handlers check it once, before any other work; it is
/// not consulted again while the store call runs.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new(cancel: CancellationToken) -> Self {
        Self { cancel }
    }

    /// A context whose signal has already fired.
    pub fn cancelled() -> Self {
        let cancel = CancellationToken::new();
        cancel.cancel();
        Self { cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Fail with [`AppError::RequestCancelled`] if the signal has fired.
    pub fn ensure_active(&self) -> AppResult<()> {
        if self.is_cancelled() {
            Err(AppError::RequestCancelled)
        } else {
            Ok(())
        }
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}
