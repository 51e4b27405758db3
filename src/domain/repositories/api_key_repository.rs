//! Repository trait for API key storage.

use crate::domain::entities::ApiKey;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for API key identity records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Stores a new key with the given label and token hash.
    async fn create_key(&self, label: &str, token_hash: &str) -> Result<ApiKey, AppError>;

    /// Finds an active (non-revoked) key by its token hash.
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<ApiKey>, AppError>;

    /// Best-effort `last_used_at` touch for auditing.
    async fn touch_last_used(&self, id: i64) -> Result<(), AppError>;

    /// Lists every key, newest first.
    async fn list_keys(&self) -> Result<Vec<ApiKey>, AppError>;

    /// Revokes a key by id. Returns `false` when the id does not exist.
    async fn revoke_key(&self, id: i64) -> Result<bool, AppError>;
}
