mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, create_test_user_with, generate_unique_email, json_request, send,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_user_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Jane", "email": email, "password": "secret123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["name"], "Jane");
    assert_eq!(body["data"]["email"], email);
    assert!(body["data"]["_id"].is_string());
    assert!(body["data"].get("password").is_none());

    let (role, is_blocked): (String, bool) =
        sqlx::query_as("SELECT role, is_blocked FROM users WHERE email = $1")
            .bind(&email)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(role, "user");
    assert!(!is_blocked);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();
    create_test_user_with(&pool, &email, "user", false).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Jane", "email": email, "password": "secret123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Duplicate Entry");
    let source = &body["error"][0];
    assert_eq!(source["path"], "email");
    assert_eq!(
        source["message"],
        format!("email \"{email}\" already exists")
    );
    assert!(body["stack"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation_errors(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "name": "Jane", "email": "not-an-email", "password": "123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation Error");
    let paths: Vec<&str> = body["error"]
        .as_array()
        .unwrap()
        .iter()
        .map(|source| source["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["email", "password"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_missing_field(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": generate_unique_email(), "password": "secret123" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"][0]["path"], "name");
    assert_eq!(body["error"][0]["message"], "name is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();
    create_test_user_with(&pool, &email, "user", false).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email.to_uppercase(), "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();
    create_test_user_with(&pool, &email, "user", false).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": "wrongpassword" }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_unknown_email(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": generate_unique_email(), "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_blocked_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let email = generate_unique_email();
    create_test_user_with(&pool, &email, "user", true).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": TEST_PASSWORD }),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User is blocked");
}
