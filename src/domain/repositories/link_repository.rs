//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashSet;

/// Repository interface for the link store.
///
/// The store is the single shared mutable resource: all serialization is
/// delegated to its unique constraint on `short_code` and its atomic
/// click-count increment.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasTaken`] when the short code already exists
    /// (authoritative uniqueness, enforced by the store even when the
    /// allocator's optimistic check passed).
    ///
    /// Returns [`AppError::Unavailable`] on store failures.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Creates a batch of links in a single transaction, all-or-nothing.
    ///
    /// Returns the persisted records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasTaken`] when any row violates short-code
    /// uniqueness; no row is persisted in that case.
    /// Returns [`AppError::Unavailable`] on store failures.
    async fn create_batch(&self, new_links: Vec<NewLink>) -> Result<Vec<Link>, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Returns the subset of `codes` that already exist in the store.
    ///
    /// Used by bulk import to pre-filter candidate aliases in one query.
    async fn existing_codes(&self, codes: &[String]) -> Result<HashSet<String>, AppError>;

    /// Atomically increments the click counter of a link.
    ///
    /// The counter never decreases; concurrent increments serialize at the
    /// store and each adds exactly one.
    async fn increment_clicks(&self, id: i64) -> Result<(), AppError>;

    /// Backfills `metadata.qrCode` when the key is still absent.
    ///
    /// A no-op when another writer already filled it, so concurrent repairs
    /// cannot overwrite each other.
    async fn set_qr_code(&self, id: i64, qr_data_url: &str) -> Result<(), AppError>;

    /// Lists an owner's links, newest first.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Deletes a link owned by `owner_id`.
    ///
    /// Returns `Ok(true)` when a row was removed, `Ok(false)` when no link
    /// matched the id/owner pair. Failures surface and are not retried.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError>;
}
