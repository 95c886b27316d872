//! Redis configuration.

use std::env;

/// Redis settings loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL. When unset, revocations are kept in
///   process memory instead.
/// - `CACHE_PREFIX`: Prefix for all keys (default: `arrest`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            key_prefix: env::var("CACHE_PREFIX").unwrap_or_else(|_| "arrest".into()),
        }
    }

    /// Build a prefixed key.
    ///
    /// ```ignore
    /// let key = CacheConfig::default().prefixed_key("revoked:abc");
    /// // "arrest:revoked:abc"
    /// ```
    pub fn prefixed_key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            key_prefix: "arrest".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key() {
        let config = CacheConfig {
            redis_url: None,
            key_prefix: "test".into(),
        };
        assert_eq!(config.prefixed_key("revoked:1"), "test:revoked:1");
    }

    #[test]
    fn test_default_has_no_redis() {
        let config = CacheConfig::default();
        assert!(config.redis_url.is_none());
        assert_eq!(config.key_prefix, "arrest");
    }
}
