use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use arrest_auth::{InMemoryInvalidationStore, TokenAuthenticationService, TokenInvalidationStore};
use arrest_cache::{CacheConfig, RedisInvalidationStore};
use arrest_config::{CorsConfig, EmailConfig, JwtConfig};
use arrest_db::{PgPool, init_db_pool};

use crate::middleware::policy::PolicyTable;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub email_config: EmailConfig,
    pub cors_config: CorsConfig,
    pub tokens: Arc<TokenAuthenticationService>,
    pub policy: Arc<PolicyTable>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        jwt_config: JwtConfig,
        email_config: EmailConfig,
        cors_config: CorsConfig,
        store: Arc<dyn TokenInvalidationStore>,
    ) -> Self {
        let tokens = TokenAuthenticationService::from_config(&jwt_config, store);

        Self {
            db,
            jwt_config,
            email_config,
            cors_config,
            tokens: Arc::new(tokens),
            policy: Arc::new(PolicyTable::standard()),
        }
    }

    /// Builds the state from environment variables.
    ///
    /// Revoked tokens go to Redis when `REDIS_URL` is set, otherwise they are
    /// kept in process memory.
    pub async fn from_env() -> anyhow::Result<Self> {
        let db = init_db_pool().await?;
        let store = init_invalidation_store(CacheConfig::from_env()).await?;

        Ok(Self::new(
            db,
            JwtConfig::from_env(),
            EmailConfig::from_env(),
            CorsConfig::from_env(),
            store,
        ))
    }
}

async fn init_invalidation_store(
    config: CacheConfig,
) -> anyhow::Result<Arc<dyn TokenInvalidationStore>> {
    if config.redis_url.is_some() {
        let store = RedisInvalidationStore::connect(config)
            .await
            .context("Failed to connect to Redis")?;
        tracing::info!("Token revocations stored in Redis");
        return Ok(Arc::new(store));
    }

    tracing::warn!("REDIS_URL not set; token revocations are kept in memory");
    let store = Arc::new(InMemoryInvalidationStore::new());

    let sweeper = Arc::clone(&store);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(300));
        loop {
            interval.tick().await;
            sweeper.purge_expired();
        }
    });

    Ok(store)
}
