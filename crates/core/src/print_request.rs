//! Print request lifecycle.
//!
//! A print request moves through `received` -> `processed` -> `finished`,
//! but only one rule is enforced: field edits are allowed while the
//! request is still `received`. The dedicated status-change path may set
//! any value, known or not, in any order.

use crate::error::CoreError;
use crate::types::DbId;

/// Entity name used in error messages and log fields.
pub const ENTITY: &str = "print request";

/// Initial status, assigned by the store default on insert.
pub const STATUS_RECEIVED: &str = "received";

/// The request has been picked up by an operator.
pub const STATUS_PROCESSED: &str = "processed";

/// The print is done.
pub const STATUS_FINISHED: &str = "finished";

/// Every status the lifecycle recognizes, in lifecycle order.
pub const KNOWN_STATUSES: [&str; 3] = [STATUS_RECEIVED, STATUS_PROCESSED, STATUS_FINISHED];

/// Whether `status` is one of [`KNOWN_STATUSES`].
///
/// Informational only. Status changes are never rejected on this basis.
pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}

/// Whether a record in `status` may be changed through the generic edit path.
pub fn is_editable(status: &str) -> bool {
    status == STATUS_RECEIVED
}

/// Reject a generic edit of record `id` unless it is still `received`.
pub fn ensure_editable(id: DbId, status: &str) -> Result<(), CoreError> {
    if is_editable(status) {
        Ok(())
    } else {
        Err(CoreError::NotEditable {
            id,
            status: status.to_string(),
        })
    }
}
