//! Optional Bearer-token identity resolution.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// The caller's resolved identity, inserted as a request extension.
///
/// Anonymous callers are first-class: creation endpoints accept them and key
/// their daily quota by client IP. Owner-scoped endpoints call
/// [`ClientIdentity::require_owner`].
#[derive(Debug, Clone)]
pub struct ClientIdentity {
    pub owner_id: Option<i64>,
    /// Daily-quota key: `key:{id}` for authenticated callers, `ip:{addr}`
    /// otherwise.
    pub quota_key: String,
}

impl ClientIdentity {
    pub fn authenticated(key_id: i64) -> Self {
        Self {
            owner_id: Some(key_id),
            quota_key: format!("key:{key_id}"),
        }
    }

    pub fn anonymous(ip: IpAddr) -> Self {
        Self {
            owner_id: None,
            quota_key: format!("ip:{ip}"),
        }
    }

    /// Returns the owner id, or [`AppError::Unauthorized`] for anonymous
    /// callers hitting an owner-scoped endpoint.
    pub fn require_owner(&self) -> Result<i64, AppError> {
        self.owner_id.ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "This endpoint requires an API key" }),
            )
        })
    }
}

/// Resolves the request identity and attaches it as an extension.
///
/// # Behavior
///
/// - No `Authorization` header: anonymous identity keyed by the peer IP.
/// - `Authorization: Bearer <token>` with a valid token: authenticated
///   identity carrying the stable key id.
/// - A present but invalid or revoked token: `401 Unauthorized`. A bad
///   credential is never silently demoted to anonymous.
pub async fn layer(
    State(st): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let identity = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => {
            let key = st.auth.authenticate(&token).await?;
            ClientIdentity::authenticated(key.id)
        }
        Err(_) => ClientIdentity::anonymous(addr.ip()),
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_identity_keys_by_key_id() {
        let identity = ClientIdentity::authenticated(7);

        assert_eq!(identity.owner_id, Some(7));
        assert_eq!(identity.quota_key, "key:7");
        assert_eq!(identity.require_owner().unwrap(), 7);
    }

    #[test]
    fn test_anonymous_identity_keys_by_ip() {
        let identity = ClientIdentity::anonymous("1.2.3.4".parse().unwrap());

        assert!(identity.owner_id.is_none());
        assert_eq!(identity.quota_key, "ip:1.2.3.4");
    }

    #[test]
    fn test_anonymous_require_owner_is_unauthorized() {
        let identity = ClientIdentity::anonymous("1.2.3.4".parse().unwrap());

        assert!(matches!(
            identity.require_owner().unwrap_err(),
            AppError::Unauthorized { .. }
        ));
    }
}
