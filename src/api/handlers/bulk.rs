//! Handler for bulk caption import.

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::api::dto::bulk::{BulkQuery, BulkRequest};
use crate::api::middleware::identity::ClientIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates many links from `Caption;URL` lines.
///
/// # Endpoint
///
/// `POST /api/bulk`. JSON report by default; `?format=csv` returns the
/// successful rows as a CSV document
/// (`Caption,Original URL,Alias,Shortened URL`).
///
/// # Request Body
///
/// ```json
/// {
///   "lines": "My Post;https://example.com/a\nSecond;https://example.com/b"
/// }
/// ```
///
/// Lines are processed in order; per-line failures are reported in the
/// outcome list while the rest of the batch proceeds. The first daily-quota
/// denial stops processing of the remaining lines. All staged rows are
/// persisted in one transaction; a store-level failure of that insert fails
/// the whole request with no partial success.
///
/// # Errors
///
/// - `400` request validation failed
/// - `409` / `503` the batched insert itself was rejected
pub async fn bulk_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<ClientIdentity>,
    Query(query): Query<BulkQuery>,
    Json(payload): Json<BulkRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;

    let report = state
        .bulk
        .process(&payload.lines, identity.owner_id, &identity.quota_key)
        .await?;

    if query.format.as_deref() == Some("csv") {
        let csv = report.to_csv()?;
        return Ok((
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response());
    }

    Ok(Json(report).into_response())
}
