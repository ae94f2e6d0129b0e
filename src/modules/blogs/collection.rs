use inkpost_db::query::Collection;
use inkpost_models::BlogRow;

/// Columns producing a [`BlogRow`], with `b` the blog and `u` its author.
pub const BLOG_COLUMNS: &str = "b.id, b.title, b.content, b.is_published, b.author_id, \
     u.name AS author_name, u.email AS author_email, b.created_at, b.updated_at";

/// Fields the `search` term is matched against.
pub const SEARCHABLE_FIELDS: [&str; 2] = ["title", "content"];

/// Blogs joined with their authors, addressable by public field name.
pub struct BlogCollection;

impl Collection for BlogCollection {
    type Row = BlogRow;

    const SOURCE: &'static str = "blogs b JOIN users u ON u.id = b.author_id";
    const SELECT: &'static str = BLOG_COLUMNS;
    const PRIMARY_KEY: &'static str = "b.id";

    fn column(field: &str) -> Option<&'static str> {
        let column = match field {
            "_id" | "id" => "b.id",
            "title" => "b.title",
            "content" => "b.content",
            "author" => "b.author_id",
            "isPublished" => "b.is_published",
            "createdAt" => "b.created_at",
            "updatedAt" => "b.updated_at",
            _ => return None,
        };
        Some(column)
    }
}
