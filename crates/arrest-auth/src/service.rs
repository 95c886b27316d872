//! Token issuing and validation.

use std::sync::Arc;

use arrest_config::JwtConfig;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::claims::{AccessClaims, RefreshTokenClaims, TokenType};
use crate::error::TokenError;
use crate::identity::AuthenticatedIdentity;
use crate::keys::SigningKey;
use crate::revocation::TokenInvalidationStore;

/// A freshly signed token together with the metadata callers need to return
/// or revoke it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
}

pub struct TokenAuthenticationService {
    key: SigningKey,
    access_ttl: i64,
    refresh_ttl: i64,
    store: Arc<dyn TokenInvalidationStore>,
}

impl std::fmt::Debug for TokenAuthenticationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthenticationService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenAuthenticationService {
    pub fn new(
        key: SigningKey,
        access_ttl: i64,
        refresh_ttl: i64,
        store: Arc<dyn TokenInvalidationStore>,
    ) -> Self {
        Self {
            key,
            access_ttl,
            refresh_ttl,
            store,
        }
    }

    pub fn from_config(config: &JwtConfig, store: Arc<dyn TokenInvalidationStore>) -> Self {
        Self::new(
            SigningKey::from_secret(config.secret.as_bytes()),
            config.access_token_expiry,
            config.refresh_token_expiry,
            store,
        )
    }

    pub fn issue_access_token(
        &self,
        user_id: Uuid,
        username: &str,
        roles: Vec<String>,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let exp = now + self.access_ttl;
        let jti = Uuid::new_v4().to_string();

        let claims = AccessClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            roles,
            jti: jti.clone(),
            token_type: TokenType::Access,
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, self.key.encoding())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_at: timestamp(exp)?,
            expires_in: self.access_ttl,
        })
    }

    pub fn issue_refresh_token(
        &self,
        user_id: Uuid,
        username: &str,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let exp = now + self.refresh_ttl;
        let jti = Uuid::new_v4().to_string();

        let claims = RefreshTokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            jti: jti.clone(),
            token_type: TokenType::Refresh,
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, self.key.encoding())
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti,
            expires_at: timestamp(exp)?,
            expires_in: self.refresh_ttl,
        })
    }

    /// Validates an access token: signature, expiry, token type and revocation.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedIdentity, TokenError> {
        let claims = decode::<AccessClaims>(token, self.key.decoding(), &validation())?.claims;

        if claims.token_type != TokenType::Access {
            return Err(TokenError::WrongType);
        }

        self.ensure_not_invalidated(&claims.jti).await?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Malformed)?;

        Ok(AuthenticatedIdentity {
            user_id,
            username: claims.username,
            roles: claims.roles,
            token_id: claims.jti,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }

    /// Same checks as [`authenticate`](Self::authenticate), for refresh tokens.
    pub async fn verify_refresh_token(
        &self,
        token: &str,
    ) -> Result<RefreshTokenClaims, TokenError> {
        let claims =
            decode::<RefreshTokenClaims>(token, self.key.decoding(), &validation())?.claims;

        if claims.token_type != TokenType::Refresh {
            return Err(TokenError::WrongType);
        }

        self.ensure_not_invalidated(&claims.jti).await?;
        Ok(claims)
    }

    /// Verifies a refresh token and revokes it in the same store operation, so
    /// each refresh token can be exchanged only once.
    pub async fn consume_refresh_token(
        &self,
        token: &str,
    ) -> Result<RefreshTokenClaims, TokenError> {
        let claims = self.verify_refresh_token(token).await?;

        let ttl_secs = (claims.exp - Utc::now().timestamp()).max(1) as u64;
        if !self.store.invalidate_if_absent(&claims.jti, ttl_secs).await? {
            tracing::warn!(jti = %claims.jti, "Refresh token already consumed");
            return Err(TokenError::Invalidated);
        }

        tracing::info!(jti = %claims.jti, ttl_secs, "Refresh token consumed");
        Ok(claims)
    }

    /// Revokes `jti` until `expires_at`. Already-expired tokens need no entry.
    pub async fn invalidate(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<(), TokenError> {
        let remaining = (expires_at - Utc::now()).num_seconds();
        if remaining <= 0 {
            return Ok(());
        }
        self.store.invalidate(jti, remaining as u64).await?;
        tracing::info!(jti = %jti, ttl_secs = remaining, "Token invalidated");
        Ok(())
    }

    async fn ensure_not_invalidated(&self, jti: &str) -> Result<(), TokenError> {
        if self.store.is_invalidated(jti).await? {
            tracing::warn!(jti = %jti, "Rejected invalidated token");
            return Err(TokenError::Invalidated);
        }
        Ok(())
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(secs, 0).ok_or(TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revocation::{InMemoryInvalidationStore, StoreError, StoreFuture};

    const SECRET: &[u8] = b"test-secret-key-for-unit-tests";

    fn service() -> TokenAuthenticationService {
        TokenAuthenticationService::new(
            SigningKey::from_secret(SECRET),
            3600,
            604800,
            Arc::new(InMemoryInvalidationStore::new()),
        )
    }

    struct FailingStore;

    impl TokenInvalidationStore for FailingStore {
        fn invalidate<'a>(&'a self, _jti: &'a str, _ttl: u64) -> StoreFuture<'a, ()> {
            Box::pin(async { Err(StoreError("down".to_string())) })
        }

        fn is_invalidated<'a>(&'a self, _jti: &'a str) -> StoreFuture<'a, bool> {
            Box::pin(async { Err(StoreError("down".to_string())) })
        }

        fn invalidate_if_absent<'a>(&'a self, _jti: &'a str, _ttl: u64) -> StoreFuture<'a, bool> {
            Box::pin(async { Err(StoreError("down".to_string())) })
        }
    }

    #[tokio::test]
    async fn test_refresh_token_consumed_once() {
        let svc = service();
        let issued = svc.issue_refresh_token(Uuid::new_v4(), "jdoe").unwrap();

        let claims = svc.consume_refresh_token(&issued.token).await.unwrap();
        assert_eq!(claims.jti, issued.jti);
        assert!(matches!(
            svc.consume_refresh_token(&issued.token).await,
            Err(TokenError::Invalidated)
        ));
        assert!(matches!(
            svc.verify_refresh_token(&issued.token).await,
            Err(TokenError::Invalidated)
        ));
    }

    #[tokio::test]
    async fn test_concurrent_refresh_consumption_has_one_winner() {
        let svc = Arc::new(service());
        let issued = svc.issue_refresh_token(Uuid::new_v4(), "jdoe").unwrap();

        let (first, second) = tokio::join!(
            svc.consume_refresh_token(&issued.token),
            svc.consume_refresh_token(&issued.token)
        );
        assert_eq!(
            [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_access_token_roundtrip() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let issued = svc
            .issue_access_token(user_id, "jdoe", vec!["PERSONE".to_string()])
            .unwrap();

        let identity = svc.authenticate(&issued.token).await.unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.username, "jdoe");
        assert_eq!(identity.roles, vec!["PERSONE".to_string()]);
        assert_eq!(identity.token_id, issued.jti);
        assert_eq!(identity.expires_at, issued.expires_at);
    }

    #[tokio::test]
    async fn test_refresh_token_rejected_as_access() {
        let svc = service();
        let issued = svc.issue_refresh_token(Uuid::new_v4(), "jdoe").unwrap();
        assert_eq!(
            svc.authenticate(&issued.token).await,
            Err(TokenError::WrongType)
        );
    }

    #[tokio::test]
    async fn test_access_token_rejected_as_refresh() {
        let svc = service();
        let issued = svc
            .issue_access_token(Uuid::new_v4(), "jdoe", vec![])
            .unwrap();
        assert_eq!(
            svc.verify_refresh_token(&issued.token).await.unwrap_err(),
            TokenError::WrongType
        );
    }

    #[tokio::test]
    async fn test_garbage_is_malformed() {
        let svc = service();
        assert_eq!(
            svc.authenticate("not.a.token").await,
            Err(TokenError::Malformed)
        );
    }

    #[tokio::test]
    async fn test_wrong_secret_is_malformed() {
        let other = TokenAuthenticationService::new(
            SigningKey::from_secret(b"another-secret"),
            3600,
            3600,
            Arc::new(InMemoryInvalidationStore::new()),
        );
        let issued = other
            .issue_access_token(Uuid::new_v4(), "jdoe", vec![])
            .unwrap();
        assert_eq!(
            service().authenticate(&issued.token).await,
            Err(TokenError::Malformed)
        );
    }

    #[tokio::test]
    async fn test_expired_token() {
        let svc = TokenAuthenticationService::new(
            SigningKey::from_secret(SECRET),
            -120,
            -120,
            Arc::new(InMemoryInvalidationStore::new()),
        );
        let issued = svc
            .issue_access_token(Uuid::new_v4(), "jdoe", vec![])
            .unwrap();
        assert_eq!(
            svc.authenticate(&issued.token).await,
            Err(TokenError::Expired)
        );
    }

    #[tokio::test]
    async fn test_invalidated_token_rejected() {
        let svc = service();
        let issued = svc
            .issue_access_token(Uuid::new_v4(), "jdoe", vec![])
            .unwrap();
        svc.invalidate(&issued.jti, issued.expires_at).await.unwrap();
        assert_eq!(
            svc.authenticate(&issued.token).await,
            Err(TokenError::Invalidated)
        );
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let svc = TokenAuthenticationService::new(
            SigningKey::from_secret(SECRET),
            3600,
            3600,
            Arc::new(FailingStore),
        );
        let issued = svc
            .issue_access_token(Uuid::new_v4(), "jdoe", vec![])
            .unwrap();
        let err = svc.authenticate(&issued.token).await.unwrap_err();
        assert!(matches!(err, TokenError::Store(_)));
        assert!(!err.is_rejection());
    }

    #[tokio::test]
    async fn test_invalidate_past_expiry_is_noop() {
        let svc = TokenAuthenticationService::new(
            SigningKey::from_secret(SECRET),
            3600,
            3600,
            Arc::new(FailingStore),
        );
        let past = Utc::now() - chrono::Duration::seconds(10);
        assert!(svc.invalidate("old", past).await.is_ok());
    }

    #[test]
    fn test_each_token_gets_unique_jti() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let a = svc.issue_refresh_token(user_id, "jdoe").unwrap();
        let b = svc.issue_refresh_token(user_id, "jdoe").unwrap();
        assert_ne!(a.jti, b.jti);
        assert_ne!(a.token, b.token);
    }
}
