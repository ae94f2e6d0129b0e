//! Success envelope shared by every handler.
//!
//! ```json
//! {
//!   "success": true,
//!   "message": "Blogs fetched successfully",
//!   "statusCode": 200,
//!   "data": [...],
//!   "meta": { "total": 42, "limit": 10, "page": 1, "totalPages": 5, "hasMore": true }
//! }
//! ```
//!
//! `meta` is only present on list responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::pagination::PaginationMeta;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status,
            success: true,
            message: message.into(),
            status_code: status.as_u16(),
            data,
            meta: None,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, message, data)
    }

    #[must_use]
    pub fn with_meta(mut self, meta: PaginationMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
