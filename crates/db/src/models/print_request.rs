//! Print request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use threedee_core::types::DbId;

/// A row from the `print_requests` table.
///
/// Also the shape of create and edit bodies: every field falls back to its
/// zero value when absent, and `id` / `status` in a body are ignored by
/// the operations that should not change them.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintRequest {
    pub id: DbId,
    pub item_name: String,
    /// Grams.
    pub estimated_weight: f64,
    pub estimated_filament_length: f64,
    /// Minutes.
    pub estimated_duration: i32,
    pub file_url: String,
    pub requestor: String,
    pub status: String,
}

impl PrintRequest {
    /// Overwrite the editable fields with `input`. `id` and `status` stay.
    pub fn apply_edit(&mut self, input: PrintRequest) {
        self.item_name = input.item_name;
        self.estimated_weight = input.estimated_weight;
        self.estimated_filament_length = input.estimated_filament_length;
        self.estimated_duration = input.estimated_duration;
        self.file_url = input.file_url;
        self.requestor = input.requestor;
    }
}

/// Body of `PUT /print-requests/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
