use axum::extract::State;
use inkpost_core::{ApiResponse, AppError, ErrorBody};
use tracing::instrument;

use crate::modules::admin::service::AdminService;
use crate::state::AppState;
use crate::validator::PathId;

#[utoipa::path(
    patch,
    path = "/api/admin/users/{userId}/block",
    params(("userId" = uuid::Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User blocked successfully"),
        (status = 400, description = "Invalid ID or user already blocked", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Requires the admin role", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn block_user(
    State(state): State<AppState>,
    PathId(user_id): PathId,
) -> Result<ApiResponse<()>, AppError> {
    AdminService::block_user(&state.db, user_id).await?;
    Ok(ApiResponse::ok("User blocked successfully", ()))
}

#[utoipa::path(
    delete,
    path = "/api/admin/blogs/{id}",
    params(("id" = uuid::Uuid, Path, description = "Blog ID")),
    responses(
        (status = 200, description = "Blog deleted successfully"),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Requires the admin role", body = ErrorBody),
        (status = 404, description = "Blog does not exist", body = ErrorBody)
    ),
    tag = "Admin",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_blog(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<()>, AppError> {
    AdminService::delete_blog(&state.db, id).await?;
    Ok(ApiResponse::ok("Blog deleted successfully", ()))
}
