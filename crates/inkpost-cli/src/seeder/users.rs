use fake::Fake;
use fake::faker::name::en::Name;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use uuid::Uuid;

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

// 3 params per user, well under the 65535 bind limit
const BATCH_SIZE: usize = 1000;

/// Generates users in parallel. Emails are unique per index.
pub fn generate_users(count: usize, password_hash: &str) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let name: String = Name().fake();
            let local = name
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(".");

            UserSeed {
                email: format!("{local}+{idx}@{SEED_EMAIL_DOMAIN}"),
                name,
                password_hash: password_hash.to_string(),
            }
        })
        .collect()
}

/// Inserts users in batches inside one transaction and returns their ids.
pub async fn insert_users_batch(db: &PgPool, users: &[UserSeed]) -> anyhow::Result<Vec<Uuid>> {
    let start_time = Instant::now();
    println!("👥 Inserting {} users...", users.len());

    let mut tx = db.begin().await?;
    let mut ids = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let mut query =
            QueryBuilder::<Postgres>::new("INSERT INTO users (name, email, password) ");
        query.push_values(chunk, |mut row, user| {
            row.push_bind(&user.name)
                .push_bind(&user.email)
                .push_bind(&user.password_hash);
        });
        query.push(" RETURNING id");

        let chunk_ids: Vec<Uuid> = query.build_query_scalar().fetch_all(&mut *tx).await?;
        ids.extend(chunk_ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        ids.len(),
        start_time.elapsed()
    );
    Ok(ids)
}

/// Deletes seeded users; their blogs go with them.
pub async fn clear_users(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(format!("%@{SEED_EMAIL_DOMAIN}"))
        .execute(db)
        .await?
        .rows_affected();

    println!("   ✓ Deleted {} users in {:?}", deleted, start_time.elapsed());
    Ok(deleted)
}
