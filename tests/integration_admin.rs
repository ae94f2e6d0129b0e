mod common;

use axum::http::StatusCode;
use common::{create_test_blog, create_test_user, create_test_user_with, empty_request, generate_unique_email, send, setup_test_app};
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_blocks_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;
    let user = create_test_user(&pool, "user").await;

    let (status, body) = send(
        &app,
        empty_request(
            "PATCH",
            &format!("/api/admin/users/{}/block", user.id),
            Some(&admin.bearer()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User blocked successfully");
    assert!(body["data"].is_null());

    let is_blocked: bool = sqlx::query_scalar("SELECT is_blocked FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(is_blocked);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_block_already_blocked_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;
    let user = create_test_user_with(&pool, &generate_unique_email(), "user", true).await;

    let (status, body) = send(
        &app,
        empty_request(
            "PATCH",
            &format!("/api/admin/users/{}/block", user.id),
            Some(&admin.bearer()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already blocked!");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_block_missing_user(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;

    let (status, body) = send(
        &app,
        empty_request(
            "PATCH",
            &format!("/api/admin/users/{}/block", Uuid::new_v4()),
            Some(&admin.bearer()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_block_user_invalid_id(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;

    let (status, body) = send(
        &app,
        empty_request("PATCH", "/api/admin/users/abc/block", Some(&admin.bearer())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID");
    assert_eq!(body["error"][0]["path"], "userId");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_block_user_requires_admin(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let user = create_test_user(&pool, "user").await;
    let target = create_test_user(&pool, "user").await;

    let (status, _) = send(
        &app,
        empty_request(
            "PATCH",
            &format!("/api/admin/users/{}/block", target.id),
            Some(&user.bearer()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        empty_request(
            "PATCH",
            &format!("/api/admin/users/{}/block", target.id),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_deletes_any_blog(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;
    let author = create_test_user(&pool, "user").await;
    let blog_id = create_test_blog(&pool, &author, "Spam", "body").await;

    let (status, body) = send(
        &app,
        empty_request(
            "DELETE",
            &format!("/api/admin/blogs/{blog_id}"),
            Some(&admin.bearer()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Blog deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blogs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_delete_missing_blog(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let admin = create_test_user(&pool, "admin").await;

    let (status, body) = send(
        &app,
        empty_request(
            "DELETE",
            &format!("/api/admin/blogs/{}", Uuid::new_v4()),
            Some(&admin.bearer()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Blog does not exist");
}
