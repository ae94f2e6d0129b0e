//! # Inkpost DB
//!
//! Database pool and query utilities for the Inkpost API.
//!
//! - [`init_db_pool`]: builds the shared PostgreSQL pool
//! - [`query`]: composes search/sort/filter/pagination over a [`query::Collection`]
//!
//! # Example
//!
//! ```ignore
//! use inkpost_config::DatabaseConfig;
//! use inkpost_db::init_db_pool;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//!     // Use pool for database operations
//!     Ok(())
//! }
//! ```

pub mod query;

use inkpost_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Initializes a PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and should be passed to the
/// application state for use in request handlers.
///
/// # Errors
///
/// Returns an error if the connection to the database cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database pool initialized"
    );

    Ok(pool)
}

// Re-export PgPool for convenience
pub use sqlx::PgPool;
