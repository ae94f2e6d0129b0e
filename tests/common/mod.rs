#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use inkpost::router::init_router;
use inkpost::state::AppState;
use inkpost_auth::create_access_token;
use inkpost_config::{AppConfig, CorsConfig, Environment, JwtConfig, RateLimitConfig, ServerConfig};
use inkpost_core::hash_password;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        let token = create_access_token(self.id, &self.email, &self.role, &test_config().jwt)
            .expect("failed to sign test token");
        format!("Bearer {token}")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        environment: Environment::Production,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 3600,
        },
        cors: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            ..Default::default()
        },
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    setup_test_app_with(pool, test_config())
}

pub fn setup_test_app_with(pool: PgPool, config: AppConfig) -> Router {
    init_router(AppState::new(pool, &config))
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

pub async fn create_test_user(pool: &PgPool, role: &str) -> TestUser {
    create_test_user_with(pool, &generate_unique_email(), role, false).await
}

pub async fn create_test_user_with(
    pool: &PgPool,
    email: &str,
    role: &str,
    is_blocked: bool,
) -> TestUser {
    let hashed = hash_password(TEST_PASSWORD).unwrap();
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO users (name, email, password, role, is_blocked)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind("Test User")
    .bind(email)
    .bind(hashed)
    .bind(role)
    .bind(is_blocked)
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        name: "Test User".to_string(),
        email: email.to_string(),
        role: role.to_string(),
    }
}

pub async fn create_test_blog(pool: &PgPool, author: &TestUser, title: &str, content: &str) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO blogs (title, content, author_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(title)
    .bind(content)
    .bind(author.id)
    .fetch_one(pool)
    .await
    .unwrap();
    id
}

/// Sends `request` through a fresh copy of `app` and decodes the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(bearer) = bearer {
        builder = builder.header("authorization", bearer);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(bearer) = bearer {
        builder = builder.header("authorization", bearer);
    }
    builder.body(Body::empty()).unwrap()
}
