//! PostgreSQL connection settings.
//!
//! - `DATABASE_URL`: Connection string (required to connect)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)

use std::env;

/// Database connection configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Connection URL, `None` when `DATABASE_URL` is unset.
    pub url: Option<String>,

    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(5),
        }
    }
}
