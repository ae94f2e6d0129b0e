use axum::extract::State;
use inkpost_core::{ApiResponse, AppError, ErrorBody};
use inkpost_models::{LoginRequest, LoginResponse, RegisterUserDto, RegisteredUser};
use tracing::instrument;

use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered successfully", body = RegisteredUser),
        (status = 400, description = "Validation error or email already exists", body = ErrorBody),
        (status = 429, description = "Too many requests", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterUserDto>,
) -> Result<ApiResponse<RegisteredUser>, AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok(ApiResponse::created("User registered successfully", user))
}

/// Login and receive a JWT access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 403, description = "User is blocked", body = ErrorBody),
        (status = 429, description = "Too many requests", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(ApiResponse::ok("Login successful", response))
}
