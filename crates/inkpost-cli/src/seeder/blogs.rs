use fake::Fake;
use fake::faker::boolean::en::Boolean;
use fake::faker::lorem::en::{Paragraph, Sentence};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Instant;
use uuid::Uuid;

use super::models::BlogSeed;

const BATCH_SIZE: usize = 1000;

/// Generates `per_author` blogs for each author, about 80% published.
pub fn generate_blogs(author_ids: &[Uuid], per_author: usize) -> Vec<BlogSeed> {
    author_ids
        .par_iter()
        .flat_map(|&author_id| {
            (0..per_author)
                .map(|_| {
                    let title: String = Sentence(3..8).fake();
                    BlogSeed {
                        title: title.trim_end_matches('.').to_string(),
                        content: Paragraph(3..8).fake(),
                        author_id,
                        is_published: Boolean(80).fake(),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn insert_blogs_batch(db: &PgPool, blogs: &[BlogSeed]) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("📝 Inserting {} blogs...", blogs.len());

    let mut tx = db.begin().await?;
    let mut inserted = 0;

    for chunk in blogs.chunks(BATCH_SIZE) {
        let mut query = QueryBuilder::<Postgres>::new(
            "INSERT INTO blogs (title, content, author_id, is_published) ",
        );
        query.push_values(chunk, |mut row, blog| {
            row.push_bind(&blog.title)
                .push_bind(&blog.content)
                .push_bind(blog.author_id)
                .push_bind(blog.is_published);
        });

        inserted += query.build().execute(&mut *tx).await?.rows_affected();
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} blogs in {:?}",
        inserted,
        start_time.elapsed()
    );
    Ok(inserted)
}
