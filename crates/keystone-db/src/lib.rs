//! # Keystone DB
//!
//! PostgreSQL pool initialization and the embedded schema migrations used by
//! the PostgreSQL-backed planning collaborators.
//!
//! # Example
//!
//! ```ignore
//! use keystone_config::DatabaseConfig;
//! use keystone_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), keystone_db::DbError> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::fmt;

use keystone_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Error raised while connecting or migrating.
#[derive(Debug)]
pub enum DbError {
    /// `DATABASE_URL` is not configured.
    MissingUrl,

    /// Connection to the database failed.
    Connect(sqlx::Error),

    /// Applying migrations failed.
    Migrate(sqlx::migrate::MigrateError),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUrl => write!(f, "DATABASE_URL must be set"),
            Self::Connect(e) => write!(f, "Failed to connect to database: {}", e),
            Self::Migrate(e) => write!(f, "Failed to run migrations: {}", e),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingUrl => None,
            Self::Connect(e) => Some(e),
            Self::Migrate(e) => Some(e),
        }
    }
}

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared by every
/// PostgreSQL-backed collaborator.
///
/// # Errors
///
/// Returns [`DbError::MissingUrl`] when no URL is configured and
/// [`DbError::Connect`] when the connection fails.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, DbError> {
    let url = config.url.as_deref().ok_or(DbError::MissingUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .map_err(DbError::Connect)?;

    info!(max_connections = config.max_connections, "Database pool initialized");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(DbError::Migrate)?;

    info!("Database migrations applied");
    Ok(())
}
