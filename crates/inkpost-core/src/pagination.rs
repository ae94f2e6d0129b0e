//! Pagination utilities for list endpoints.
//!
//! List endpoints are page-based:
//!
//! - `limit`: Items per page (1-100, default: 10)
//! - `page`: Page number (1-indexed, default: 1)
//!
//! Values arrive as raw query strings. Anything that does not parse as an
//! integer falls back to the default instead of rejecting the request.
//!
//! # Example
//!
//! ```ignore
//! use inkpost_core::pagination::{PaginationMeta, PaginationParams};
//!
//! // GET /api/blogs?limit=20&page=3
//! let params = PaginationParams::parse(Some("20"), Some("3"));
//! assert_eq!(params.offset(), 40);
//!
//! let meta = PaginationMeta::new(&params, total);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Metadata about a paginated response.
///
/// # Example JSON
///
/// ```json
/// {
///   "total": 42,
///   "limit": 10,
///   "page": 2,
///   "totalPages": 5,
///   "hasMore": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Maximum items per page (the limit that was applied)
    pub limit: i64,
    /// Current page number
    pub page: i64,
    /// Number of pages needed for `total` items
    pub total_pages: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(params: &PaginationParams, total: i64) -> Self {
        let limit = params.limit();
        let total = total.max(0);

        Self {
            total,
            limit,
            page: params.page(),
            total_pages: (total + limit - 1) / limit,
            has_more: params.offset() + limit < total,
        }
    }
}

/// Pagination directive for a list query.
///
/// # Limits
///
/// - `limit` is clamped to the range [1, 100]
/// - `page` is clamped to a minimum of 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
            page: Some(1),
        }
    }
}

impl PaginationParams {
    /// Builds params from raw query string values.
    #[must_use]
    pub fn parse(limit: Option<&str>, page: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());

        Self {
            limit: parse(limit),
            page: parse(page),
        }
    }

    /// Returns the effective limit, clamped to [1, 100].
    ///
    /// Defaults to 10 if not specified.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Returns the page number, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}
