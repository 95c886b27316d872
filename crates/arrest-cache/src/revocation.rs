//! Redis implementation of [`TokenInvalidationStore`].
//!
//! Revoked ids are stored as `<prefix>:revoked:<jti>` with a TTL matching the
//! token's remaining lifetime, so entries disappear on their own and every
//! API instance sees the same revocations.

use std::time::Duration;

use arrest_auth::{StoreError, StoreFuture, TokenInvalidationStore};

use crate::config::CacheConfig;
use crate::redis::{CacheError, RedisCache};

#[derive(Debug, Clone)]
pub struct RedisInvalidationStore {
    cache: RedisCache,
    config: CacheConfig,
}

impl RedisInvalidationStore {
    pub fn new(cache: RedisCache, config: CacheConfig) -> Self {
        Self { cache, config }
    }

    /// Connects using `config.redis_url`.
    pub async fn connect(config: CacheConfig) -> Result<Self, CacheError> {
        let url = config
            .redis_url
            .clone()
            .ok_or_else(|| CacheError::Connection(missing_url()))?;
        let cache = RedisCache::new(&url).await?;
        cache.health_check().await?;
        Ok(Self::new(cache, config))
    }

    fn key(&self, jti: &str) -> String {
        self.config.prefixed_key(&format!("revoked:{jti}"))
    }
}

fn missing_url() -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::InvalidClientConfig, "REDIS_URL is not set"))
}

impl From<CacheError> for StoreError {
    fn from(err: CacheError) -> Self {
        StoreError(err.to_string())
    }
}

impl TokenInvalidationStore for RedisInvalidationStore {
    fn invalidate<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.cache
                .set_flag(&self.key(jti), Duration::from_secs(ttl_secs))
                .await?;
            Ok(())
        })
    }

    fn is_invalidated<'a>(&'a self, jti: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            match self.cache.exists(&self.key(jti)).await {
                Ok(found) => Ok(found),
                Err(e) => {
                    tracing::error!(error = %e, "Revocation lookup failed");
                    Err(e.into())
                }
            }
        })
    }

    fn invalidate_if_absent<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let claimed = self
                .cache
                .set_flag_if_absent(&self.key(jti), Duration::from_secs(ttl_secs))
                .await?;
            Ok(claimed)
        })
    }
}
