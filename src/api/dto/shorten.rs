//! DTOs for single-link creation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL. Validated as an absolute http(s) URL by the
    /// service before any store call.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Optional custom alias; whitespace is collapsed to hyphens, blank
    /// falls back to a random code.
    #[validate(length(max = 50))]
    pub custom_alias: Option<String>,
}

/// A created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub qr_code: Option<String>,
    /// Remaining single-link creations for this identity today.
    pub links_left_today: u32,
}
