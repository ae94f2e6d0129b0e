//! # Inkpost API
//!
//! A blogging REST API built with Rust, Axum, and PostgreSQL.
//!
//! ## Overview
//!
//! - **Authentication**: registration and JWT login, with blocked users refused
//! - **Blogs**: public listing with search, filtering, sorting and pagination;
//!   authors create, update and delete their own posts
//! - **Administration**: admins block users and remove any blog
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── inkpost-core/     # AppError and its classification, envelopes, passwords
//! ├── inkpost-config/   # Environment-driven configuration
//! ├── inkpost-db/       # Pool setup and the collection query builder
//! ├── inkpost-auth/     # JWT claims, issuing and verification
//! ├── inkpost-models/   # Rows, DTOs and response shapes
//! └── inkpost-cli/      # Admin creation and seeding
//! src/
//! ├── middleware/       # Auth extractor, role layers, rate limit, error presentation
//! ├── modules/          # Feature modules (auth, blogs, admin)
//! ├── router.rs         # Route tree and shared layers
//! └── validator.rs      # Validated JSON and path id extractors
//! ```
//!
//! Each feature module follows the same layout:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic and SQL
//! - `router.rs`: Axum router configuration
//!
//! ## Errors
//!
//! Every failure becomes an [`inkpost_core::AppError`] and is rendered as the
//! same envelope:
//!
//! ```json
//! {
//!   "success": false,
//!   "message": "Duplicate Entry",
//!   "statusCode": 400,
//!   "error": [{ "path": "email", "message": "email \"jane@example.com\" already exists" }],
//!   "stack": null
//! }
//! ```
//!
//! `stack` is only filled in when `APP_ENV=development`.

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
