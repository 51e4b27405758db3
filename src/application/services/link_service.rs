//! Link creation and owner-scoped management.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::alias_allocator::AliasAllocator;
use crate::application::services::quota::{DailyQuota, QuotaKind};
use crate::domain::entities::{Link, LinkMetadata, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::qr::qr_data_url;
use crate::utils::url_validator::validate_original_url;

/// Service for creating, listing, and deleting short links.
///
/// Creation order: validate the destination, reserve a daily-quota slot,
/// allocate a short code, render the QR image, persist. Validation failures
/// never reach the store and never consume quota.
pub struct LinkService<R: LinkRepository> {
    repository: Arc<R>,
    allocator: AliasAllocator<R>,
    quota: Arc<DailyQuota>,
    base_url: String,
}

impl<R: LinkRepository> LinkService<R> {
    pub fn new(repository: Arc<R>, quota: Arc<DailyQuota>, base_url: String) -> Self {
        let allocator = AliasAllocator::new(repository.clone());
        Self {
            repository,
            allocator,
            quota,
            base_url,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `original_url` - destination; must parse as an absolute http(s) URL
    /// - `custom_alias` - optional requested alias; blank falls back to random
    /// - `owner_id` - stable identity, or `None` for anonymous creation
    /// - `quota_key` - daily-quota key (owner id or client IP)
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - destination rejected, before any store call
    /// - [`AppError::LimitReached`] - daily single-link quota exhausted
    /// - [`AppError::AliasTaken`] - requested alias in use (either check)
    /// - [`AppError::AllocationExhausted`] - random allocation kept colliding
    pub async fn create_short_link(
        &self,
        original_url: &str,
        custom_alias: Option<&str>,
        owner_id: Option<i64>,
        quota_key: &str,
    ) -> Result<Link, AppError> {
        let original_url = validate_original_url(original_url)
            .map_err(|e| AppError::invalid_url(e.to_string(), json!({})))?;

        self.quota.check_and_reserve(quota_key, QuotaKind::Single)?;

        let short_code = self.allocator.allocate(custom_alias).await?;

        let qr_code = qr_data_url(&self.short_url(&short_code))
            .map_err(|e| AppError::internal("Failed to render QR code", json!({ "reason": e.to_string() })))?;

        let new_link = NewLink {
            short_code,
            original_url,
            owner_id,
            metadata: LinkMetadata {
                qr_code: Some(qr_code),
                ..LinkMetadata::default()
            },
        };

        self.repository.create(new_link).await
    }

    /// Lists the caller's links, newest first.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }

    /// Deletes one of the caller's links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no link matches the id for this
    /// owner (including links owned by someone else).
    pub async fn delete_link(&self, id: i64, owner_id: i64) -> Result<(), AppError> {
        let deleted = self.repository.delete(id, owner_id).await?;

        if !deleted {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }

    /// Remaining single-link creations for this quota key today.
    pub fn links_left_today(&self, quota_key: &str) -> u32 {
        self.quota.remaining(quota_key, QuotaKind::Single)
    }

    /// Canonical short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
