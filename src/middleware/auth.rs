use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use inkpost_auth::verify_token;
use inkpost_core::AppError;
use inkpost_models::{Claims, UserRole};
use uuid::Uuid;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides the caller's claims.
///
/// When a role layer already verified the token, the stored user is reused.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// `None` when the token carries a role this server does not know.
    pub fn role(&self) -> Option<UserRole> {
        self.0.role.parse().ok()
    }

    pub fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.role().is_some_and(|role| roles.contains(&role))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("You are not authorized user"))?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}
