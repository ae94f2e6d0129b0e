use inkpost_core::{AppError, PaginationMeta};
use inkpost_db::query::{QueryBuilder, QueryParams};
use inkpost_models::{BlogRow, CreateBlogDto, UpdateBlogDto};
use sqlx::PgPool;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::collection::{BLOG_COLUMNS, BlogCollection, SEARCHABLE_FIELDS};

const BLOG_NOT_FOUND: &str = "Blog does not exist";
const NOT_AUTHOR_UPDATE: &str = "You are not the author of this blog!!";
const NOT_AUTHOR_DELETE: &str =
    "You cannot delete this blog as you are not the author of this blog!!";

pub struct BlogService;

impl BlogService {
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "blogs"))]
    pub async fn create_blog(
        db: &PgPool,
        author_id: Uuid,
        dto: CreateBlogDto,
    ) -> Result<BlogRow, AppError> {
        let sql = format!(
            "WITH b AS (
                INSERT INTO blogs (title, content, author_id)
                VALUES ($1, $2, $3)
                RETURNING *
             )
             SELECT {BLOG_COLUMNS} FROM b JOIN users u ON u.id = b.author_id"
        );

        let blog = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(dto.title.trim())
            .bind(&dto.content)
            .bind(author_id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create blog");
                AppError::from(e)
            })?;

        info!(blog.id = %blog.id, "Blog created");
        Ok(blog)
    }

    /// Lists blogs narrowed by `search`, equality filters, sort and page.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "blogs"))]
    pub async fn list_blogs(
        db: &PgPool,
        params: &QueryParams,
    ) -> Result<(Vec<BlogRow>, PaginationMeta), AppError> {
        let query = QueryBuilder::<BlogCollection>::new(params)
            .search(&SEARCHABLE_FIELDS)
            .filter()
            .sort()
            .paginate();

        let total = query.count(db).await?;
        let blogs = query.fetch_all(db).await?;

        debug!(total, returned = blogs.len(), "Blogs fetched");
        Ok((blogs, PaginationMeta::new(&query.pagination(), total)))
    }

    /// Applies a partial update to a blog owned by `user_id`.
    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "blogs"))]
    pub async fn update_blog(
        db: &PgPool,
        blog_id: Uuid,
        user_id: Uuid,
        dto: UpdateBlogDto,
    ) -> Result<BlogRow, AppError> {
        Self::ensure_author(db, blog_id, user_id, NOT_AUTHOR_UPDATE).await?;

        let sql = format!(
            "WITH b AS (
                UPDATE blogs
                SET title = COALESCE($2, title),
                    content = COALESCE($3, content),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING *
             )
             SELECT {BLOG_COLUMNS} FROM b JOIN users u ON u.id = b.author_id"
        );

        let blog = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(blog_id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.content)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(BLOG_NOT_FOUND))?;

        info!(blog.id = %blog.id, "Blog updated");
        Ok(blog)
    }

    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "blogs"))]
    pub async fn delete_blog(db: &PgPool, blog_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        Self::ensure_author(db, blog_id, user_id, NOT_AUTHOR_DELETE).await?;
        Self::delete_any_blog(db, blog_id).await
    }

    /// Deletes a blog regardless of its author.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "blogs"))]
    pub async fn delete_any_blog(db: &PgPool, blog_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(blog_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(BLOG_NOT_FOUND));
        }

        info!(blog.id = %blog_id, "Blog deleted");
        Ok(())
    }

    /// 404 when the blog is missing, 401 with `denied` when someone else wrote it.
    async fn ensure_author(
        db: &PgPool,
        blog_id: Uuid,
        user_id: Uuid,
        denied: &str,
    ) -> Result<(), AppError> {
        let author_id =
            sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM blogs WHERE id = $1")
                .bind(blog_id)
                .fetch_optional(db)
                .await?
                .ok_or_else(|| AppError::not_found(BLOG_NOT_FOUND))?;

        if author_id != user_id {
            warn!(blog.id = %blog_id, user.id = %user_id, "Non-author attempted to modify blog");
            return Err(AppError::unauthorized(denied));
        }

        Ok(())
    }
}
