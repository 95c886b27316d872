//! # Arrest Cache
//!
//! Redis-backed storage for revoked token ids, shared across API instances.
//!
//! # Example
//!
//! ```ignore
//! use arrest_cache::{CacheConfig, RedisInvalidationStore};
//!
//! let store = RedisInvalidationStore::connect(CacheConfig::from_env()).await?;
//! ```

pub mod config;
pub mod redis;
pub mod revocation;

pub use config::CacheConfig;
pub use self::redis::{CacheError, RedisCache};
pub use revocation::RedisInvalidationStore;
