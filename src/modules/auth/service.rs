use inkpost_auth::create_access_token;
use inkpost_config::JwtConfig;
use inkpost_core::{AppError, hash_password, verify_password};
use inkpost_models::{LoginRequest, LoginResponse, RegisterUserDto, RegisteredUser, UserCredentials};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub struct AuthService;

impl AuthService {
    /// Creates a `user`-role account. A taken email surfaces as the
    /// unique-constraint violation, i.e. a duplicate-entry error.
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "users"))]
    pub async fn register_user(
        db: &PgPool,
        dto: RegisterUserDto,
    ) -> Result<RegisteredUser, AppError> {
        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, RegisteredUser>(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, name, email",
        )
        .bind(dto.name.trim())
        .bind(normalize_email(&dto.email))
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to register user");
            AppError::from(e)
        })?;

        info!(user.id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password, role, is_blocked FROM users WHERE email = $1",
        )
        .bind(normalize_email(&dto.email))
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(&dto.password, &credentials.password)? {
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if credentials.is_blocked {
            warn!(user.id = %credentials.id, "Blocked user attempted to log in");
            return Err(AppError::forbidden("User is blocked"));
        }

        let token = create_access_token(
            credentials.id,
            &credentials.email,
            &credentials.role,
            jwt_config,
        )?;

        info!(user.id = %credentials.id, "User logged in");
        Ok(LoginResponse { token })
    }
}
