//! Search, sort, filter, and pagination over a persisted collection.
//!
//! A [`QueryBuilder`] starts from untrusted request parameters and a
//! [`Collection`] describing the table. Each step narrows or orders the
//! query and hands the builder back, so calls chain. Nothing touches the
//! database until [`QueryBuilder::fetch_all`] or [`QueryBuilder::count`].
//!
//! Narrowing steps always combine with AND, in whatever order they run.
//! Parameter values are bound, never interpolated, and field names only
//! reach SQL after being resolved through [`Collection::column`].
//!
//! # Example
//!
//! ```ignore
//! use inkpost_db::query::{QueryBuilder, QueryParams};
//!
//! // GET /api/blogs?search=rust&sortBy=title&sortOrder=desc&isPublished=true&page=2
//! let query = QueryBuilder::<BlogCollection>::new(&params)
//!     .search(&["title", "content"])
//!     .filter()
//!     .sort()
//!     .paginate();
//!
//! let blogs = query.fetch_all(&db).await?;
//! let total = query.count(&db).await?;
//! ```

mod builder;
mod collection;
mod params;
mod predicate;

pub use builder::{QueryBuilder, Sort, SortDirection};
pub use collection::Collection;
pub use params::{QueryParams, RESERVED_KEYS};
pub use predicate::{Document, FieldRef, Predicate, escape_like};
