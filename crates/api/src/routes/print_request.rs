//! Route definitions for print requests.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::print_request;
use crate::state::AppState;

/// Routes for the print request queue.
///
/// ```text
/// GET    /print-requests               -> list
/// POST   /print-requests               -> create
/// GET    /print-requests/{id}          -> show
/// PUT    /print-requests/{id}          -> update
/// DELETE /print-requests/{id}          -> delete
/// PUT    /print-requests/{id}/status   -> change_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/print-requests",
            get(print_request::list).post(print_request::create),
        )
        .route(
            "/print-requests/{id}",
            get(print_request::show)
                .put(print_request::update)
                .delete(print_request::delete),
        )
        .route(
            "/print-requests/{id}/status",
            put(print_request::change_status),
        )
}
