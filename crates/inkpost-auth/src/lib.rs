//! # Inkpost Auth
//!
//! Authentication types and JWT utilities for the Inkpost API.
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use inkpost_auth::{create_access_token, verify_token};
//! use inkpost_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", "user", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
