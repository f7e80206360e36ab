//! Database connection pool setup.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use gf_shared::config::DatabaseConfig;

/// Create a Postgres connection pool
///
/// The pool is internally synchronized and safe to share across concurrent
/// request handlers. A refused connection at startup is fatal.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.connection_url())
        .await?;

    tracing::info!(
        host = %config.host,
        database = %config.database,
        "connected to database"
    );

    Ok(pool)
}
