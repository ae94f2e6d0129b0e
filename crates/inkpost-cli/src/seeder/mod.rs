//! Fake data for local development.
//!
//! All seeded users share one bcrypt hash, computed once at a low cost.

pub mod blogs;
pub mod models;
pub mod users;

use anyhow::Context;
use sqlx::PgPool;
use std::time::Instant;

pub use models::{SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig};

/// Cost used for the shared seed password hash.
const SEED_HASH_COST: u32 = 4;

pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Users: {}", config.users);
    println!("   - Blogs per user: {}", config.blogs_per_user);

    let password_hash =
        bcrypt::hash(SEED_PASSWORD, SEED_HASH_COST).context("Failed to hash password")?;

    let seeds = users::generate_users(config.users, &password_hash);
    let author_ids = users::insert_users_batch(db, &seeds).await?;

    let blog_seeds = blogs::generate_blogs(&author_ids, config.blogs_per_user);
    blogs::insert_blogs_batch(db, &blog_seeds).await?;

    println!(
        "\n✅ Seeded {} users and {} blogs in {:?}",
        author_ids.len(),
        blog_seeds.len(),
        start_time.elapsed()
    );
    println!("   Log in as any seeded user with password: {SEED_PASSWORD}");
    Ok(())
}

pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let deleted = users::clear_users(db).await?;
    println!("✅ Cleared {deleted} seeded users and their blogs");
    Ok(())
}
