//! Revoked-token bookkeeping.
//!
//! A revoked `jti` only needs to be remembered until the token would have
//! expired anyway, so every entry carries a TTL.

use std::{
    future::Future,
    pin::Pin,
    time::{Duration, Instant},
};

use dashmap::{DashMap, mapref::entry::Entry};

/// Backend failure. Callers treat it as "cannot prove the token is still valid".
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct StoreError(pub String);

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait TokenInvalidationStore: Send + Sync {
    /// Marks `jti` as revoked for `ttl_secs` seconds.
    fn invalidate<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, ()>;

    /// - `Ok(true)`: revoked
    /// - `Ok(false)`: not revoked
    /// - `Err(_)`: backend failure (fail closed)
    fn is_invalidated<'a>(&'a self, jti: &'a str) -> StoreFuture<'a, bool>;

    /// Revokes `jti` unless it is already revoked, as a single atomic step.
    /// Returns `true` when this call did the revoking.
    fn invalidate_if_absent<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, bool>;
}

/// Process-local store for single-instance deployments and tests.
#[derive(Debug, Default)]
pub struct InMemoryInvalidationStore {
    entries: DashMap<String, Instant>,
}

impl InMemoryInvalidationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops entries whose TTL has elapsed.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, until| *until > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TokenInvalidationStore for InMemoryInvalidationStore {
    fn invalidate<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let until = Instant::now() + Duration::from_secs(ttl_secs);
            self.entries.insert(jti.to_string(), until);
            Ok(())
        })
    }

    fn is_invalidated<'a>(&'a self, jti: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let now = Instant::now();
            let revoked = match self.entries.get(jti) {
                Some(until) => *until > now,
                None => return Ok(false),
            };
            if !revoked {
                self.entries.remove(jti);
            }
            Ok(revoked)
        })
    }

    fn invalidate_if_absent<'a>(&'a self, jti: &'a str, ttl_secs: u64) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            let now = Instant::now();
            let until = now + Duration::from_secs(ttl_secs);
            // The entry guard holds the shard lock until the insert is done.
            let claimed = match self.entries.entry(jti.to_string()) {
                Entry::Occupied(mut entry) => {
                    if *entry.get() > now {
                        false
                    } else {
                        entry.insert(until);
                        true
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(until);
                    true
                }
            };
            Ok(claimed)
        })
    }
}
