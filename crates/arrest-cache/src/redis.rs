//! Thin Redis client over a multiplexed connection manager.

use std::time::Duration;

use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Connection` if the URL is invalid or the server
    /// cannot be reached.
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }

    /// Stores a marker value under `key` that expires after `ttl`.
    #[instrument(skip(self), fields(cache.operation = "SETEX"))]
    pub async fn set_flag(&self, key: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        // SETEX rejects a zero expiry.
        let secs = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, 1u8, secs).await?;

        debug!(cache.key = %key, cache.ttl_secs = secs, "Flag set");
        Ok(())
    }

    /// Unlike a lookup that treats errors as misses, backend errors are returned.
    #[instrument(skip(self), fields(cache.operation = "EXISTS"))]
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    /// `SET key 1 NX EX ttl`. Returns `true` when the key was newly written.
    #[instrument(skip(self), fields(cache.operation = "SET NX"))]
    pub async fn set_flag_if_absent(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();

        let secs = ttl.as_secs().max(1);
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(1u8)
            .arg("NX")
            .arg("EX")
            .arg(secs)
            .query_async(&mut conn)
            .await?;

        let written = reply.is_some();
        debug!(cache.key = %key, cache.ttl_secs = secs, written, "Conditional flag set");
        Ok(written)
    }

    #[instrument(skip(self), fields(cache.operation = "PING"))]
    pub async fn health_check(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }
}
