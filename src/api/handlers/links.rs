//! Handlers for owner-scoped link listing and deletion.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::{LinkSummary, ListLinksResponse};
use crate::api::middleware::identity::ClientIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, newest first, with a total-clicks aggregate.
///
/// # Endpoint
///
/// `GET /api/links` (requires an API key)
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<ClientIdentity>,
) -> Result<Json<ListLinksResponse>, AppError> {
    let owner_id = identity.require_owner()?;

    let links = state.links.list_links(owner_id).await?;

    let total_clicks = links.iter().map(|link| link.click_count).sum();
    let summaries: Vec<LinkSummary> = links
        .into_iter()
        .map(|link| {
            let short_url = state.links.short_url(&link.short_code);
            LinkSummary::from_link(link, short_url)
        })
        .collect();

    Ok(Json(ListLinksResponse {
        total: summaries.len(),
        total_clicks,
        links: summaries,
    }))
}

/// Deletes one of the caller's links. The record is removed entirely.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}` (requires an API key)
///
/// # Errors
///
/// Returns 404 Not Found when the id does not exist or belongs to another
/// owner.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<ClientIdentity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let owner_id = identity.require_owner()?;

    state.links.delete_link(id, owner_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
