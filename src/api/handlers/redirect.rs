//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code (QR backfill happens off-path if needed)
/// 2. The resolver enqueues the click increment, which is never awaited here
/// 3. Return `307 Temporary Redirect` to the stored destination
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.resolver.resolve(&code).await?;

    Ok(Redirect::temporary(&resolution.original_url))
}
