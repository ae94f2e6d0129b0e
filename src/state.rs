use inkpost_config::{AppConfig, CorsConfig, Environment, JwtConfig, RateLimitConfig};
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            db,
            jwt_config: config.jwt.clone(),
            cors_config: config.cors.clone(),
            rate_limit_config: config.rate_limit.clone(),
            environment: config.environment,
        }
    }
}
