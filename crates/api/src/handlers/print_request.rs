//! Handlers for the `/print-requests` resource.
//!
//! Every handler checks the request's cancellation context first, then
//! the path id, then the body, and only then touches the store.

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, PathRejection};
use axum::extract::{Path, State};
use threedee_core::error::CoreError;
use threedee_core::print_request::{self as lifecycle, ENTITY};
use threedee_core::types::DbId;
use threedee_db::models::print_request::{PrintRequest, StatusUpdate};
use threedee_db::repositories::PrintRequestStore;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::normalizer::normalize;
use crate::response::Envelope;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Any path rejection (including a segment that is not valid UTF-8) is
/// reported the same way as a non-numeric id.
fn parse_id(path: Result<Path<String>, PathRejection>) -> AppResult<DbId> {
    path.ok()
        .and_then(|Path(raw)| raw.parse().ok())
        .ok_or_else(|| AppError::BadRequest("id is not a number".into()))
}

async fn find_existing(store: &dyn PrintRequestStore, id: DbId) -> AppResult<PrintRequest> {
    store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /print-requests
///
/// List active print requests. No rows is a 404, not an empty list.
pub async fn list(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> AppResult<Envelope<Vec<PrintRequest>>> {
    ctx.ensure_active()?;

    let records = state.store.list_active().await?;
    if records.is_empty() {
        return Err(CoreError::Empty { entity: ENTITY }.into());
    }
    Ok(Envelope::success(records))
}

/// GET /print-requests/{id}
pub async fn show(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Envelope<PrintRequest>> {
    ctx.ensure_active()?;
    let id = parse_id(path)?;

    let record = find_existing(state.store.as_ref(), id).await?;
    Ok(Envelope::success(record))
}

/// POST /print-requests
///
/// Insert, then re-read the row so the response carries the stored
/// representation (including the default status).
pub async fn create(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<PrintRequest>> {
    ctx.ensure_active()?;
    let input: PrintRequest = normalize(body)?;

    let id = state.store.create(&input).await?;
    let record = state.store.find_by_id(id).await?.ok_or_else(|| {
        CoreError::Internal(format!("{ENTITY} {id} missing immediately after insert"))
    })?;

    tracing::info!(id, requestor = %record.requestor, "Print request created");
    Ok(Envelope::success(record))
}

/// PUT /print-requests/{id}
///
/// Replace the editable fields. Only allowed while the request is still
/// `received`; the stored status is kept regardless of the body.
pub async fn update(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<PrintRequest>> {
    ctx.ensure_active()?;
    let id = parse_id(path)?;
    let input: PrintRequest = normalize(body)?;

    let mut record = find_existing(state.store.as_ref(), id).await?;
    lifecycle::ensure_editable(id, &record.status)?;

    record.apply_edit(input);
    if !state.store.update(&record).await? {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }
    Ok(Envelope::success(record))
}

/// DELETE /print-requests/{id}
///
/// Soft delete: the row stays, flagged inactive.
pub async fn delete(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Envelope<()>> {
    ctx.ensure_active()?;
    let id = parse_id(path)?;

    if !state.store.deactivate(id).await? {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }
    Ok(Envelope::success(()))
}

/// PUT /print-requests/{id}/status
///
/// Set the status to any value, from any state. Unrecognized values are
/// logged and stored anyway.
pub async fn change_status(
    State(state): State<AppState>,
    ctx: RequestContext,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Envelope<StatusUpdate>> {
    ctx.ensure_active()?;
    let id = parse_id(path)?;
    let input: StatusUpdate = normalize(body)?;

    let mut record = find_existing(state.store.as_ref(), id).await?;
    if !lifecycle::is_known_status(&input.status) {
        tracing::warn!(id, status = %input.status, "Storing unrecognized print request status");
    }

    let previous = std::mem::replace(&mut record.status, input.status.clone());
    if !state.store.update(&record).await? {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }

    tracing::info!(id, from = %previous, to = %record.status, "Print request status changed");
    Ok(Envelope::success(input))
}
