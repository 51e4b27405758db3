//! DTO for the health endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    /// Free slots in the click-event queue.
    pub click_queue_capacity: usize,
}
