use inkpost_core::AppError;
use inkpost_models::User;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::blogs::service::BlogService;

pub struct AdminService;

impl AdminService {
    /// Sets the block flag on a user who is not blocked yet.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn block_user(db: &PgPool, user_id: Uuid) -> Result<User, AppError> {
        let blocked = sqlx::query_as::<_, User>(
            "UPDATE users
             SET is_blocked = TRUE, updated_at = NOW()
             WHERE id = $1 AND is_blocked = FALSE
             RETURNING id, name, email, role, is_blocked, created_at, updated_at",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        if let Some(user) = blocked {
            info!(user.id = %user.id, "User blocked");
            return Ok(user);
        }

        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(db)
            .await?;

        if exists {
            Err(AppError::bad_request("User already blocked!"))
        } else {
            Err(AppError::not_found("User not found"))
        }
    }

    #[instrument(skip(db))]
    pub async fn delete_blog(db: &PgPool, blog_id: Uuid) -> Result<(), AppError> {
        BlogService::delete_any_blog(db, blog_id).await
    }
}
