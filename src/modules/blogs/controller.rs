use std::collections::HashMap;

use axum::extract::{Query, State};
use inkpost_core::{ApiResponse, AppError, ErrorBody};
use inkpost_db::query::QueryParams;
use inkpost_models::{BlogResponse, CreateBlogDto, UpdateBlogDto};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::blogs::service::BlogService;
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

#[utoipa::path(
    post,
    path = "/api/blogs",
    request_body = CreateBlogDto,
    responses(
        (status = 201, description = "Blog created successfully", body = BlogResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Requires the user role", body = ErrorBody)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn create_blog(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateBlogDto>,
) -> Result<ApiResponse<BlogResponse>, AppError> {
    let author_id = auth_user.user_id()?;
    let blog = BlogService::create_blog(&state.db, author_id, dto).await?;

    Ok(ApiResponse::created(
        "Blog created successfully",
        BlogResponse::from(blog),
    ))
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive match on title or content"),
        ("sortBy" = Option<String>, Query, description = "Field to sort by (default createdAt)"),
        ("sortOrder" = Option<String>, Query, description = "asc (default) or desc"),
        ("limit" = Option<i64>, Query, description = "Page size, 1-100 (default 10)"),
        ("page" = Option<i64>, Query, description = "1-based page (default 1)"),
        ("filter" = Option<String>, Query, description = "Any other field, e.g. author=<id>, is an equality filter")
    ),
    responses(
        (status = 200, description = "Blogs fetched successfully", body = Vec<BlogResponse>)
    ),
    tag = "Blogs"
)]
#[instrument(skip(state))]
pub async fn get_all_blogs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<ApiResponse<Vec<BlogResponse>>, AppError> {
    let params = QueryParams::from(params);
    let (blogs, meta) = BlogService::list_blogs(&state.db, &params).await?;

    let blogs = blogs.into_iter().map(BlogResponse::from).collect();
    Ok(ApiResponse::ok("Blogs fetched successfully", blogs).with_meta(meta))
}

#[utoipa::path(
    patch,
    path = "/api/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Blog ID")),
    request_body = UpdateBlogDto,
    responses(
        (status = 200, description = "Blog updated successfully", body = BlogResponse),
        (status = 400, description = "Invalid ID or validation error", body = ErrorBody),
        (status = 401, description = "Not the author of this blog", body = ErrorBody),
        (status = 404, description = "Blog does not exist", body = ErrorBody)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto))]
pub async fn update_blog(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateBlogDto>,
) -> Result<ApiResponse<BlogResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let blog = BlogService::update_blog(&state.db, id, user_id, dto).await?;

    Ok(ApiResponse::ok(
        "Blog updated successfully",
        BlogResponse::from(blog),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted successfully"),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Not the author of this blog", body = ErrorBody),
        (status = 404, description = "Blog does not exist", body = ErrorBody)
    ),
    tag = "Blogs",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user))]
pub async fn delete_blog(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathId(id): PathId,
) -> Result<ApiResponse<()>, AppError> {
    let user_id = auth_user.user_id()?;
    BlogService::delete_blog(&state.db, id, user_id).await?;

    Ok(ApiResponse::ok("Blog deleted successfully", ()))
}
