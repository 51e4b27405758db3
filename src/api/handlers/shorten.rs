//! Handler for single-link creation.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::identity::ClientIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates one shortened URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/article",
///   "custom_alias": "my post"   // optional
/// }
/// ```
///
/// Anonymous callers are allowed; the link is then unowned and the daily
/// quota is keyed by client IP.
///
/// # Errors
///
/// - `400` invalid URL or alias format
/// - `409` alias already taken
/// - `429` daily limit reached
/// - `503` allocation exhausted or store unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<ClientIdentity>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let link = state
        .links
        .create_short_link(
            &payload.url,
            payload.custom_alias.as_deref(),
            identity.owner_id,
            &identity.quota_key,
        )
        .await?;

    let short_url = state.links.short_url(&link.short_code);
    let links_left_today = state.links.links_left_today(&identity.quota_key);

    Ok(Json(ShortenResponse {
        code: link.short_code,
        short_url,
        original_url: link.original_url,
        qr_code: link.metadata.qr_code,
        links_left_today,
    }))
}
