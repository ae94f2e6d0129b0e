//! # Inkpost Models
//!
//! Domain models and DTOs for the Inkpost API: database rows, request
//! bodies with their validation rules, and response payloads.
//!
//! # Modules
//!
//! - [`auth`]: Login request/response
//! - [`blogs`]: Blog rows, create/update DTOs, and the blog response shape
//! - [`users`]: Users, roles, and registration
//!
//! Response payloads use the wire naming clients expect (`_id`,
//! `isPublished`), independent of the snake_case columns behind them.

pub mod auth;
pub mod blogs;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{Claims, LoginRequest, LoginResponse};
pub use blogs::{BlogResponse, BlogRow, CreateBlogDto, UpdateBlogDto};
pub use users::{AuthorInfo, RegisterUserDto, RegisteredUser, User, UserCredentials, UserRole};
