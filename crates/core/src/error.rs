use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A listing produced no rows. Surfaced as not-found rather than an
    /// empty success.
    #[error("no {entity} records found")]
    Empty { entity: &'static str },

    /// The generic edit path was used on a record that left `received`.
    #[error("cannot edit a request that is already processed")]
    NotEditable { id: DbId, status: String },

    #[error("Internal error: {0}")]
    Internal(String),
}
