//! DTOs for owner-scoped link listing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// One link in an owner's listing.
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub id: i64,
    pub code: String,
    pub short_url: String,
    pub original_url: String,
    pub click_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LinkSummary {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            code: link.short_code,
            short_url,
            original_url: link.original_url,
            click_count: link.click_count,
            caption: link.metadata.caption,
            created_at: link.created_at,
        }
    }
}

/// Owner listing with a total-clicks aggregate.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub total: usize,
    pub total_clicks: i64,
    pub links: Vec<LinkSummary>,
}
