#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use threedee_api::config::{CorsOrigins, LogFormat, ServerConfig};
use threedee_api::router::build_app_router;
use threedee_api::state::AppState;
use threedee_core::types::DbId;
use threedee_db::models::print_request::PrintRequest;
use threedee_db::repositories::PrintRequestStore;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Row {
    record: PrintRequest,
    is_active: bool,
}

#[derive(Debug, Default)]
struct Rows {
    rows: Vec<Row>,
    next_id: DbId,
}

/// [`PrintRequestStore`] double backed by a `Vec`.
///
/// Mirrors the PostgreSQL repository: ids start at 1, new rows get the
/// `received` status, and deactivation only flips a flag. Call counters
/// let tests assert which operations ran; `fail_with_store_error` makes
/// every operation fail like a lost connection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Rows>,
    failing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub deactivate_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with_store_error(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    /// Insert a row directly with the given status.
    pub fn seed(&self, item_name: &str, status: &str) -> DbId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(Row {
            record: PrintRequest {
                id,
                item_name: item_name.to_string(),
                status: status.to_string(),
                ..PrintRequest::default()
            },
            is_active: true,
        });
        id
    }

    pub fn get(&self, id: DbId) -> Option<PrintRequest> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|row| row.record.id == id)
            .map(|row| row.record.clone())
    }

    pub fn is_active(&self, id: DbId) -> Option<bool> {
        self.inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .find(|row| row.record.id == id)
            .map(|row| row.is_active)
    }

    pub fn row_count(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    pub fn total_calls(&self) -> usize {
        [
            &self.list_calls,
            &self.find_calls,
            &self.create_calls,
            &self.update_calls,
            &self.deactivate_calls,
        ]
        .iter()
        .map(|counter| counter.load(Ordering::SeqCst))
        .sum()
    }

    fn check(&self, counter: &AtomicUsize) -> Result<(), sqlx::Error> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PrintRequestStore for MemoryStore {
    async fn list_active(&self) -> Result<Vec<PrintRequest>, sqlx::Error> {
        self.check(&self.list_calls)?;
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|row| row.is_active)
            .map(|row| row.record.clone())
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<PrintRequest>, sqlx::Error> {
        self.check(&self.find_calls)?;
        Ok(self.get(id))
    }

    async fn create(&self, input: &PrintRequest) -> Result<DbId, sqlx::Error> {
        self.check(&self.create_calls)?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(Row {
            record: PrintRequest {
                id,
                status: "received".to_string(),
                ..input.clone()
            },
            is_active: true,
        });
        Ok(id)
    }

    async fn update(&self, record: &PrintRequest) -> Result<bool, sqlx::Error> {
        self.check(&self.update_calls)?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|row| row.record.id == record.id) {
            Some(row) => {
                row.record = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check(&self.deactivate_calls)?;
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|row| row.record.id == id) {
            Some(row) => {
                row.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        shutdown_timeout_secs: 30,
        log_format: LogFormat::Pretty,
    }
}

pub fn test_state(store: Arc<MemoryStore>) -> AppState {
    AppState {
        store,
        config: Arc::new(test_config()),
        shutdown: CancellationToken::new(),
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(test_state(store))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

/// Send a raw, possibly malformed body without a content type.
pub async fn send_raw(app: Router, method: &str, uri: &str, body: &'static str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn sample_body(item_name: &str) -> serde_json::Value {
    serde_json::json!({
        "item_name": item_name,
        "estimated_weight": 37.5,
        "estimated_filament_length": 5000.0,
        "estimated_duration": 9000,
        "file_url": "http://drive.example/filez/100",
        "requestor": "Karim Hartono"
    })
}
