//! DTO for short-code expansion, consumed by redirect pages.

use serde::Serialize;

use crate::application::services::{COUNTDOWN_SECONDS, Resolution};

/// Resolution metadata for a redirect page: destination, click count at
/// read, QR image, and the countdown contract.
#[derive(Debug, Serialize)]
pub struct ExpandResponse {
    pub code: String,
    pub original_url: String,
    pub short_url: String,
    pub click_count: i64,
    pub qr_code: Option<String>,
    /// Seconds the page counts down before navigating on its own; an
    /// explicit user action may redirect immediately.
    pub countdown_seconds: u8,
}

impl From<Resolution> for ExpandResponse {
    fn from(resolution: Resolution) -> Self {
        Self {
            code: resolution.short_code,
            original_url: resolution.original_url,
            short_url: resolution.short_url,
            click_count: resolution.click_count,
            qr_code: resolution.qr_code,
            countdown_seconds: COUNTDOWN_SECONDS,
        }
    }
}
