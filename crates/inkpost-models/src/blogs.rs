//! Blog domain models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::users::AuthorInfo;

/// A blog joined with its author, as selected by the blog queries.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BlogRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub author_id: Uuid,
    pub author_name: String,
    pub author_email: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Blog as returned to clients. Timestamps are not exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: AuthorInfo,
    pub is_published: bool,
}

impl From<BlogRow> for BlogResponse {
    fn from(row: BlogRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author: AuthorInfo {
                id: row.author_id,
                name: row.author_name,
                email: row.author_email,
            },
            is_published: row.is_published,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBlogDto {
    #[validate(length(min = 1, message = "title is required"))]
    #[schema(example = "Why I write Rust")]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBlogDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: Option<String>,
}
