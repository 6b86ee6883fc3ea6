//! Database connection management

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::DatabaseConfig;

/// Pool size used when none is configured.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Open a `PostgreSQL` pool sized by the database settings.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established within the
/// acquire timeout.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections.max(1))
        .acquire_timeout(config.acquire_timeout())
        .connect(&config.database_url)
        .await
}
