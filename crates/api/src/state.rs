use std::sync::Arc;

use threedee_db::repositories::PrintRequestStore;
use tokio_util::sync::CancellationToken;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Print request persistence. A trait object so tests can swap in a double.
    pub store: Arc<dyn PrintRequestStore>,
    pub config: Arc<ServerConfig>,
    /// Cancelled when graceful shutdown begins. Every request context is a
    /// child of this token.
    pub shutdown: CancellationToken,
}
