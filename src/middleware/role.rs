//! Role-based authorization layers.
//!
//! Each layer authenticates the caller, checks the role claim, and stores
//! the [`AuthUser`] in the request extensions for the handler.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use inkpost_core::AppError;
use inkpost_models::UserRole;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Admits the request only if the caller holds one of `allowed_roles`.
///
/// A missing or invalid token is a 401; a valid token with the wrong role
/// is a 403.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !auth_user.has_any_role(allowed_roles) {
        return Err(AppError::forbidden(
            "You are not authorized to access this resource.",
        ));
    }

    parts.extensions.insert(auth_user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

pub async fn require_user(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::User]).await
}

pub async fn require_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_roles(state, req, next, &[UserRole::Admin]).await
}
