//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Open metadata attached to a link.
///
/// Known keys are typed; anything else round-trips through `extra` so the
/// JSONB column stays an open mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkMetadata {
    /// Embeddable QR image of the canonical short URL, as a data URL.
    /// Backfilled lazily by the resolver when absent.
    #[serde(rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,

    /// Caption the alias was derived from (bulk imports).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,

    /// Provenance marker, e.g. `"bulk"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A stored short link.
///
/// Immutable after creation except for `click_count` (mutated only by the
/// click worker's atomic increment) and the lazy `metadata.qrCode` backfill.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub metadata: LinkMetadata,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        owner_id: Option<i64>,
        click_count: i64,
        metadata: LinkMetadata,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            owner_id,
            click_count,
            metadata,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub original_url: String,
    pub owner_id: Option<i64>,
    pub metadata: LinkMetadata,
}
