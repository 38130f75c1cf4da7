//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created
//! lazily and then pinged once, so a bad URL and an unreachable server are
//! reported as different errors.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool};

/// Maximum number of open connections.
pub const MAX_OPEN_CONNECTIONS: u32 = 10;

/// Connections kept open while idle.
pub const MAX_IDLE_CONNECTIONS: u32 = 5;

/// Maximum lifetime of a single connection.
pub const MAX_LIFETIME: Duration = Duration::from_secs(5 * 60);

/// Driver names accepted in `DRIVER_NAME`.
const POSTGRES_DRIVERS: &[&str] = &["postgres", "postgresql", "pgx"];

/// Pool bootstrap error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("unsupported database driver '{driver}'")]
    UnsupportedDriver { driver: String },

    #[error("database url is empty")]
    MissingUrl,

    #[error("error opening db: {0}")]
    Open(#[source] sqlx::Error),

    #[error("error pinging db: {0}")]
    Ping(#[source] sqlx::Error),
}

/// Open and verify a connection pool.
///
/// # Arguments
///
/// * `driver_name` - one of `postgres`, `postgresql`, `pgx`
/// * `database_url` - PostgreSQL connection string
///
/// # Example
///
/// ```ignore
/// let pool = connect("postgres", "postgres://localhost/app").await?;
/// ```
pub async fn connect(driver_name: &str, database_url: &str) -> Result<PgPool, DbError> {
    let pool = open(driver_name, database_url)?;

    let mut conn = pool.acquire().await.map_err(DbError::Ping)?;
    conn.ping().await.map_err(DbError::Ping)?;

    tracing::info!(
        max_open = MAX_OPEN_CONNECTIONS,
        max_idle = MAX_IDLE_CONNECTIONS,
        "Connected to database"
    );
    Ok(pool)
}

/// Validate parameters and build the pool without connecting.
pub fn open(driver_name: &str, database_url: &str) -> Result<PgPool, DbError> {
    if !POSTGRES_DRIVERS.contains(&driver_name.to_ascii_lowercase().as_str()) {
        return Err(DbError::UnsupportedDriver {
            driver: driver_name.to_owned(),
        });
    }

    if database_url.trim().is_empty() {
        return Err(DbError::MissingUrl);
    }

    PgPoolOptions::new()
        .max_connections(MAX_OPEN_CONNECTIONS)
        .min_connections(MAX_IDLE_CONNECTIONS)
        .max_lifetime(MAX_LIFETIME)
        .connect_lazy(database_url)
        .map_err(DbError::Open)
}
