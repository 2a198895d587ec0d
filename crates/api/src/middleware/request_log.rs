//! Timing and outcome logging around each handler invocation.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::context::RequestContext;
use crate::error::ErrorMessage;
use crate::state::AppState;

/// Wrap one handler call.
///
/// Emits exactly one event after the handler returns: `success` at info
/// level for 2xx responses, otherwise the handler's error message at warn
/// level. The response is passed through untouched.
///
/// Mount with `axum::middleware::from_fn_with_state`.
pub async fn log_request(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let query = request.uri().query().unwrap_or_default().to_owned();

    request
        .extensions_mut()
        .insert(RequestContext::new(state.shutdown.child_token()));

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let status = response.status();

    if status.is_success() {
        tracing::info!(
            method = %method,
            path = %path,
            query = %query,
            elapsed_ms,
            status = status.as_u16(),
            "success"
        );
    } else {
        // Responses built outside `AppError` (router 405s and the like)
        // carry no message; use the reason phrase.
        let message = match response.extensions().get::<ErrorMessage>() {
            Some(ErrorMessage(message)) => message.as_str(),
            None => status.canonical_reason().unwrap_or("request failed"),
        };
        tracing::warn!(
            method = %method,
            path = %path,
            query = %query,
            elapsed_ms,
            status = status.as_u16(),
            "{message}"
        );
    }

    response
}
