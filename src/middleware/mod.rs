//! Middleware and extractors for cross-cutting request concerns.
//!
//! # Modules
//!
//! - [`auth`]: `AuthUser` extractor backed by the bearer JWT
//! - [`role`]: Route layers that admit only the given roles
//! - [`rate_limit`]: Per-client-IP request quota
//! - [`errors`]: Panic recovery, the not-found fallback and development error bodies
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. A role layer (`require_user` / `require_admin`) validates the token
//!    and checks the role claim
//! 3. The verified user is stored in the request extensions
//! 4. Handlers take `AuthUser` and receive that same user
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::post};
//! use crate::middleware::role::require_user;
//!
//! let routes = Router::new().route(
//!     "/",
//!     post(create_blog).route_layer(middleware::from_fn_with_state(state.clone(), require_user)),
//! );
//! ```

pub mod auth;
pub mod errors;
pub mod rate_limit;
pub mod role;
