//! # Inkpost Config
//!
//! Configuration types for the Inkpost API.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`environment`]: Deployment environment (development / production)
//! - [`server`]: Bind address and startup behaviour
//! - [`database`]: PostgreSQL connection settings
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: Rate limiting for authentication endpoints
//!
//! Configuration is read once at startup and passed around explicitly;
//! nothing outside `from_env` touches the process environment.
//!
//! # Example
//!
//! ```ignore
//! use inkpost_config::{AppConfig, DatabaseConfig};
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! let database = DatabaseConfig::from_env()?;
//! ```

pub mod cors;
pub mod database;
pub mod environment;
pub mod jwt;
pub mod rate_limit;
pub mod server;

use thiserror::Error;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Application configuration, built once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            environment: Environment::from_env(),
            jwt: JwtConfig::from_env(),
            cors: CorsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
        }
    }
}

/// Reads and parses an environment variable, falling back to `default`.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
