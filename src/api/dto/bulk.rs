//! DTOs for the bulk caption import endpoint.

use serde::Deserialize;
use validator::Validate;

/// Bulk import request: newline-delimited `Caption;URL` entries.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkRequest {
    #[validate(length(min = 1, max = 65536))]
    pub lines: String,
}

/// Optional output selector for the bulk endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct BulkQuery {
    /// `csv` returns the successful rows as a CSV document instead of JSON.
    pub format: Option<String>,
}
