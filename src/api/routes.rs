//! API route configuration.
//!
//! Every /api route passes through the identity middleware
//! ([`crate::api::middleware::identity`]): creation endpoints accept
//! anonymous callers, listing and deletion require an API key.

use crate::api::handlers::{
    bulk_handler, delete_link_handler, expand_handler, list_links_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST   /shorten`        - Create one shortened URL
/// - `POST   /bulk`           - Bulk caption import (`?format=csv` for CSV)
/// - `GET    /expand/{code}`  - Resolution metadata for a redirect page
/// - `GET    /links`          - List the caller's links (API key required)
/// - `DELETE /links/{id}`     - Delete one of the caller's links (API key required)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/bulk", post(bulk_handler))
        .route("/expand/{code}", get(expand_handler))
        .route("/links", get(list_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
}
