use std::marker::PhantomData;

use inkpost_core::pagination::PaginationParams;
use sqlx::{PgPool, Postgres};
use tracing::debug;

use super::collection::Collection;
use super::params::QueryParams;
use super::predicate::{Document, FieldRef, Predicate, storable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` sorts descending; anything else, including nothing, ascending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Deferred query over a [`Collection`], built from request parameters.
pub struct QueryBuilder<C: Collection> {
    params: QueryParams,
    predicates: Vec<Predicate>,
    sort: Option<Sort>,
    pagination: Option<PaginationParams>,
    collection: PhantomData<fn() -> C>,
}

impl<C: Collection> QueryBuilder<C> {
    /// Takes its own copy of `params`; the caller's map is never modified.
    pub fn new(params: &QueryParams) -> Self {
        Self {
            params: params.clone(),
            predicates: Vec::new(),
            sort: None,
            pagination: None,
            collection: PhantomData,
        }
    }

    /// Matches records where any of `fields` contains the `search` term.
    ///
    /// A missing or blank term leaves the query unchanged. Fields the
    /// collection does not know are skipped.
    #[must_use]
    pub fn search(mut self, fields: &[&str]) -> Self {
        let Some(term) = self.params.get("search").map(str::trim) else {
            return self;
        };
        if term.is_empty() {
            return self;
        }
        if !storable(term) {
            self.predicates.push(Predicate::Unsatisfiable {
                field: "search".to_string(),
            });
            return self;
        }

        let fields = fields
            .iter()
            .filter_map(|name| C::column(name).map(|column| FieldRef::new(*name, column)))
            .collect();

        self.predicates.push(Predicate::Contains {
            fields,
            term: term.to_string(),
        });
        self
    }

    /// Orders by `sortBy` / `sortOrder`, with the primary key as tiebreaker.
    ///
    /// An unknown `sortBy` falls back to the collection's default sort field.
    #[must_use]
    pub fn sort(mut self) -> Self {
        let requested = self
            .params
            .get("sortBy")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(C::DEFAULT_SORT);

        let (field, column) = match C::column(requested) {
            Some(column) => (requested, column),
            None => (
                C::DEFAULT_SORT,
                C::column(C::DEFAULT_SORT).unwrap_or(C::PRIMARY_KEY),
            ),
        };

        self.sort = Some(Sort {
            field: field.to_string(),
            column,
            direction: SortDirection::from_param(self.params.get("sortOrder")),
        });
        self
    }

    /// Adds an equality constraint for every non-reserved parameter.
    #[must_use]
    pub fn filter(mut self) -> Self {
        let filters = self.params.without_reserved();

        for (name, value) in filters.iter() {
            let predicate = match C::column(name) {
                Some(column) if storable(value) => Predicate::Equals {
                    field: FieldRef::new(name, column),
                    value: value.to_string(),
                },
                _ => Predicate::Unsatisfiable {
                    field: name.to_string(),
                },
            };
            self.predicates.push(predicate);
        }
        self
    }

    /// Applies `limit` (default 10, at most 100) and 1-based `page`.
    #[must_use]
    pub fn paginate(mut self) -> Self {
        self.pagination = Some(PaginationParams::parse(
            self.params.get("limit"),
            self.params.get("page"),
        ));
        self
    }

    /// The conjunction of every narrowing applied so far.
    pub fn predicate(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort_spec(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    /// Pagination directive, or the defaults if `paginate` was never called.
    pub fn pagination(&self) -> PaginationParams {
        self.pagination.unwrap_or_default()
    }

    /// Evaluates the composed predicate against an in-memory record.
    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        self.predicates.iter().all(|p| p.matches(doc))
    }

    fn push_where(&self, qb: &mut sqlx::QueryBuilder<'static, Postgres>) {
        for (i, predicate) in self.predicates.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_sql(qb);
        }
    }

    fn push_order(&self, qb: &mut sqlx::QueryBuilder<'static, Postgres>) {
        match &self.sort {
            Some(sort) => {
                let direction = sort.direction.as_sql();
                qb.push(" ORDER BY ")
                    .push(sort.column)
                    .push(" ")
                    .push(direction);
                if sort.column != C::PRIMARY_KEY {
                    qb.push(", ").push(C::PRIMARY_KEY).push(" ").push(direction);
                }
            }
            None => {
                qb.push(" ORDER BY ").push(C::PRIMARY_KEY).push(" ASC");
            }
        }
    }

    /// The `SELECT` statement this builder describes.
    pub fn to_select(&self) -> sqlx::QueryBuilder<'static, Postgres> {
        let mut qb = sqlx::QueryBuilder::new(format!("SELECT {} FROM {}", C::SELECT, C::SOURCE));
        self.push_where(&mut qb);
        self.push_order(&mut qb);

        if let Some(pagination) = &self.pagination {
            qb.push(" LIMIT ")
                .push_bind(pagination.limit())
                .push(" OFFSET ")
                .push_bind(pagination.offset());
        }
        qb
    }

    /// `COUNT(*)` over the matching rows, ignoring sort and pagination.
    pub fn to_count(&self) -> sqlx::QueryBuilder<'static, Postgres> {
        let mut qb = sqlx::QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", C::SOURCE));
        self.push_where(&mut qb);
        qb
    }

    pub async fn fetch_all(&self, db: &PgPool) -> Result<Vec<C::Row>, sqlx::Error> {
        let mut query = self.to_select();
        debug!(sql = query.sql(), "Executing collection query");
        query.build_query_as::<C::Row>().fetch_all(db).await
    }

    pub async fn count(&self, db: &PgPool) -> Result<i64, sqlx::Error> {
        let mut query = self.to_count();
        query.build_query_scalar::<i64>().fetch_one(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(sqlx::FromRow)]
    #[allow(dead_code)]
    struct PostRow {
        id: String,
    }

    struct Posts;

    impl Collection for Posts {
        type Row = PostRow;
        const SOURCE: &'static str = "posts p";
        const SELECT: &'static str = "p.id::text AS id";
        const PRIMARY_KEY: &'static str = "p.id";

        fn column(field: &str) -> Option<&'static str> {
            match field {
                "_id" | "id" => Some("p.id"),
                "title" => Some("p.title"),
                "content" => Some("p.content"),
                "isPublished" => Some("p.is_published"),
                "createdAt" => Some("p.created_at"),
                _ => None,
            }
        }
    }

    struct Post {
        title: &'static str,
        content: &'static str,
        is_published: bool,
    }

    impl Document for Post {
        fn field_text(&self, field: &str) -> Option<String> {
            match field {
                "title" => Some(self.title.to_string()),
                "content" => Some(self.content.to_string()),
                "isPublished" => Some(self.is_published.to_string()),
                _ => None,
            }
        }
    }

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn posts() -> Vec<Post> {
        vec![
            Post {
                title: "Learning Rust",
                content: "ownership and borrowing",
                is_published: true,
            },
            Post {
                title: "Cooking",
                content: "a RUST-coloured stew",
                is_published: false,
            },
            Post {
                title: "Gardening",
                content: "tomatoes",
                is_published: true,
            },
        ]
    }

    #[test]
    fn test_search_without_term_is_noop() {
        let query = QueryBuilder::<Posts>::new(&params(&[])).search(&["title", "content"]);
        assert!(query.predicate().is_empty());

        let query =
            QueryBuilder::<Posts>::new(&params(&[("search", "   ")])).search(&["title", "content"]);
        assert!(query.predicate().is_empty());
    }

    #[test]
    fn test_search_matches_any_field_case_insensitively() {
        let query =
            QueryBuilder::<Posts>::new(&params(&[("search", "rust")])).search(&["title", "content"]);

        let matched: Vec<_> = posts()
            .into_iter()
            .filter(|p| query.matches(p))
            .map(|p| p.title)
            .collect();

        assert_eq!(matched, vec!["Learning Rust", "Cooking"]);
    }

    #[test]
    fn test_search_skips_unknown_fields() {
        let query = QueryBuilder::<Posts>::new(&params(&[("search", "rust")]))
            .search(&["title", "summary"]);

        match &query.predicate()[0] {
            Predicate::Contains { fields, .. } => {
                assert_eq!(fields, &vec![FieldRef::new("title", "p.title")]);
            }
            other => panic!("unexpected predicate: {other:?}"),
        }
    }

    #[test]
    fn test_filter_ignores_reserved_keys() {
        let query = QueryBuilder::<Posts>::new(&params(&[
            ("search", "rust"),
            ("sortBy", "title"),
            ("sortOrder", "desc"),
            ("limit", "5"),
            ("page", "2"),
            ("fields", "title"),
        ]))
        .filter();

        assert!(query.predicate().is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let input = params(&[("search", "rust"), ("isPublished", "true")]);
        let before = input.clone();

        let _query = QueryBuilder::<Posts>::new(&input).search(&["title"]).filter();

        assert_eq!(input, before);
    }

    #[test]
    fn test_filter_equality() {
        let query = QueryBuilder::<Posts>::new(&params(&[("isPublished", "false")])).filter();

        let matched: Vec<_> = posts()
            .into_iter()
            .filter(|p| query.matches(p))
            .map(|p| p.title)
            .collect();

        assert_eq!(matched, vec!["Cooking"]);
    }

    #[test]
    fn test_filter_on_unknown_field_matches_nothing() {
        let query = QueryBuilder::<Posts>::new(&params(&[("color", "red")])).filter();

        assert_eq!(
            query.predicate(),
            &[Predicate::Unsatisfiable {
                field: "color".to_string()
            }]
        );
        assert!(posts().iter().all(|p| !query.matches(p)));
    }

    #[test]
    fn test_search_and_filter_compose_with_and_in_any_order() {
        let input = params(&[("search", "rust"), ("isPublished", "true")]);

        let search_first = QueryBuilder::<Posts>::new(&input)
            .search(&["title", "content"])
            .filter();
        let filter_first = QueryBuilder::<Posts>::new(&input)
            .filter()
            .search(&["title", "content"]);

        for post in posts() {
            assert_eq!(search_first.matches(&post), filter_first.matches(&post));
        }

        let matched: Vec<_> = posts()
            .into_iter()
            .filter(|p| search_first.matches(p))
            .map(|p| p.title)
            .collect();
        assert_eq!(matched, vec!["Learning Rust"]);
    }

    #[test]
    fn test_nul_bytes_never_reach_the_database() {
        let query = QueryBuilder::<Posts>::new(&params(&[
            ("search", "a\0b"),
            ("title", "Cooking\0"),
        ]))
        .search(&["title", "content"])
        .filter();

        assert_eq!(
            query.predicate(),
            &[
                Predicate::Unsatisfiable {
                    field: "search".to_string()
                },
                Predicate::Unsatisfiable {
                    field: "title".to_string()
                },
            ]
        );
        assert!(posts().iter().all(|p| !query.matches(p)));

        let select = query.to_select();
        assert_eq!(
            select.sql(),
            "SELECT p.id::text AS id FROM posts p WHERE FALSE AND FALSE ORDER BY p.id ASC"
        );
    }

    #[test]
    fn test_default_sort_is_created_at_ascending() {
        let query = QueryBuilder::<Posts>::new(&params(&[])).sort();
        let sort = query.sort_spec().unwrap();

        assert_eq!(sort.field, "createdAt");
        assert_eq!(sort.column, "p.created_at");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_desc() {
        let query =
            QueryBuilder::<Posts>::new(&params(&[("sortBy", "title"), ("sortOrder", "desc")])).sort();
        let sort = query.sort_spec().unwrap();

        assert_eq!(sort.column, "p.title");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_unknown_sort_order_is_ascending() {
        assert_eq!(SortDirection::from_param(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("DESC")), SortDirection::Desc);
        assert_eq!(SortDirection::from_param(None), SortDirection::Asc);
    }

    #[test]
    fn test_unknown_sort_field_falls_back_to_default() {
        let query =
            QueryBuilder::<Posts>::new(&params(&[("sortBy", "title; DROP TABLE posts")])).sort();
        let sort = query.sort_spec().unwrap();

        assert_eq!(sort.field, "createdAt");
        assert_eq!(sort.column, "p.created_at");
    }

    #[test]
    fn test_paginate_defaults_and_clamping() {
        let query = QueryBuilder::<Posts>::new(&params(&[])).paginate();
        assert_eq!(query.pagination().limit(), 10);
        assert_eq!(query.pagination().offset(), 0);

        let query =
            QueryBuilder::<Posts>::new(&params(&[("limit", "500"), ("page", "3")])).paginate();
        assert_eq!(query.pagination().limit(), 100);
        assert_eq!(query.pagination().offset(), 200);
    }

    #[test]
    fn test_select_sql_shape() {
        let query = QueryBuilder::<Posts>::new(&params(&[
            ("search", "rust"),
            ("isPublished", "true"),
            ("sortBy", "title"),
            ("sortOrder", "desc"),
        ]))
        .search(&["title", "content"])
        .filter()
        .sort()
        .paginate();

        let select = query.to_select();
        let sql = select.sql();

        assert!(sql.starts_with("SELECT p.id::text AS id FROM posts p WHERE ("));
        assert!(sql.contains(" AND (CAST(p.is_published AS TEXT) = $3)"));
        assert!(sql.contains(" ORDER BY p.title DESC, p.id DESC"));
        assert!(sql.ends_with(" LIMIT $4 OFFSET $5"));
        assert!(!sql.contains("rust"));
    }

    #[test]
    fn test_count_sql_ignores_sort_and_pagination() {
        let query = QueryBuilder::<Posts>::new(&params(&[("isPublished", "true"), ("page", "2")]))
            .filter()
            .sort()
            .paginate();

        let count = query.to_count();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM posts p WHERE (CAST(p.is_published AS TEXT) = $1)"
        );
    }

    #[test]
    fn test_select_without_predicates_has_no_where() {
        let query = QueryBuilder::<Posts>::new(&params(&[])).sort();
        assert_eq!(
            query.to_select().sql(),
            "SELECT p.id::text AS id FROM posts p ORDER BY p.created_at ASC, p.id ASC"
        );
    }
}
