//! # Arrest DB
//!
//! PostgreSQL connection pool for the Arrest Management API.
//!
//! # Example
//!
//! ```ignore
//! use arrest_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), arrest_db::DbInitError> {
//!     let pool = init_db_pool().await?;
//!     Ok(())
//! }
//! ```

use std::env;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

/// Why the pool could not be created at startup.
#[derive(Debug, thiserror::Error)]
pub enum DbInitError {
    #[error("DATABASE_URL must be set")]
    MissingUrl,
    #[error("Failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
}

/// Reads `DATABASE_URL` and opens a connection pool.
///
/// Call once during startup; the returned pool is cheap to clone.
pub async fn init_db_pool() -> Result<PgPool, DbInitError> {
    let database_url = env::var("DATABASE_URL").map_err(|_| DbInitError::MissingUrl)?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .map_err(DbInitError::Connect)?;

    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}
