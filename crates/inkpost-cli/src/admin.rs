use anyhow::{Context, bail};
use inkpost_core::hash_password;
use sqlx::PgPool;
use uuid::Uuid;

/// Inserts an `admin` user. Fails if the email is already registered.
pub async fn create_admin(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<Uuid> {
    let hashed_password = hash_password(password).context("Failed to hash password")?;

    let user_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (name, email, password, role)
         VALUES ($1, $2, $3, 'admin')
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(name.trim())
    .bind(email.trim().to_lowercase())
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    match user_id {
        Some(id) => Ok(id),
        None => bail!("User with this email already exists"),
    }
}
