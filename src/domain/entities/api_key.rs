//! API key entity: a stable identity for token-authenticated clients.

use chrono::{DateTime, Utc};

/// A stored API key. Only the HMAC of the raw token is persisted.
#[derive(Debug, Clone)]
pub struct ApiKey {
    pub id: i64,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revocation_flag() {
        let mut key = ApiKey {
            id: 1,
            label: "ci".to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        assert!(!key.is_revoked());

        key.revoked_at = Some(Utc::now());
        assert!(key.is_revoked());
    }
}
