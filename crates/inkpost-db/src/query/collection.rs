use sqlx::FromRow;
use sqlx::postgres::PgRow;

/// A persisted record type the [`QueryBuilder`](super::QueryBuilder) can query.
///
/// Public field names are what clients send (`sortBy=createdAt`,
/// `isPublished=true`); [`Collection::column`] maps them to SQL columns.
/// A name it does not know never reaches the database.
pub trait Collection {
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// `FROM` clause: the table, plus any joins the select list needs.
    const SOURCE: &'static str;

    /// Select list producing [`Collection::Row`].
    const SELECT: &'static str;

    /// Column used to break sort ties.
    const PRIMARY_KEY: &'static str;

    /// Public name of the field to sort by when none (or an unknown one) is requested.
    const DEFAULT_SORT: &'static str = "createdAt";

    fn column(field: &str) -> Option<&'static str>;
}
