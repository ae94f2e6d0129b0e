//! # Inkpost Core
//!
//! Core types, errors, and utilities for the Inkpost API.
//!
//! This crate provides foundational types used throughout the Inkpost application:
//!
//! - [`errors`]: Application error type, failure classification, and the error envelope
//! - [`response`]: Success envelope returned by every handler
//! - [`pagination`]: Page-based pagination for list endpoints
//! - [`password`]: Secure password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use inkpost_core::errors::AppError;
//! use inkpost_core::response::ApiResponse;
//!
//! // An application failure with an explicit status
//! let error = AppError::not_found("Blog does not exist");
//!
//! // A success envelope
//! let body = ApiResponse::ok("Blogs fetched successfully", blogs);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorBody, ErrorEnvelope, ErrorKind, ErrorReport, ErrorSource};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use response::ApiResponse;
