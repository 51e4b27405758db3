//! Handler for short-code expansion.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::expand::ExpandResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Expands a short code into the metadata a redirect page renders: the
/// destination, the click count at read, the QR image, and the countdown
/// length. Counts as a visit: the click increment is enqueued exactly like
/// the direct redirect path.
///
/// # Endpoint
///
/// `GET /api/expand/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn expand_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExpandResponse>, AppError> {
    let resolution = state.resolver.resolve(&code).await?;

    Ok(Json(resolution.into()))
}
