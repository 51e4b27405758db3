//! Identity resolution for API-key-bearing requests.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::ApiKey;
use crate::domain::repositories::ApiKeyRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Resolves Bearer tokens to stable owner identities.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by the server signing secret)
/// before storage and comparison; a database leak alone cannot verify or
/// forge tokens.
pub struct AuthService<R: ApiKeyRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: ApiKeyRepository> AuthService<R> {
    /// # Arguments
    ///
    /// - `repository` - API key repository
    /// - `signing_secret` - HMAC key; must match the value used when keys
    ///   were minted
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256, producing 64 lowercase hex chars.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token and returns the identity it belongs to.
    ///
    /// Touches `last_used_at` on success (best-effort, failures ignored).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<ApiKey, AppError> {
        let token_hash = self.hash_token(token);

        let Some(key) = self.repository.find_active_by_hash(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        };

        let _ = self.repository.touch_last_used(key.id).await;

        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockApiKeyRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn active_key(id: i64) -> ApiKey {
        ApiKey {
            id,
            label: "ci".to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        }
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_authenticate_success_returns_identity() {
        let mut mock_repo = MockApiKeyRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);

        mock_repo
            .expect_find_active_by_hash()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(active_key(7))));

        mock_repo
            .expect_touch_last_used()
            .withf(|id| *id == 7)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let key = service.authenticate(token).await.unwrap();
        assert_eq!(key.id, 7);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_token() {
        let mut mock_repo = MockApiKeyRepository::new();

        mock_repo
            .expect_find_active_by_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let service = AuthService::new(Arc::new(MockApiKeyRepository::new()), test_secret());

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockApiKeyRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockApiKeyRepository::new()),
            "secret-b".to_string(),
        );

        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
