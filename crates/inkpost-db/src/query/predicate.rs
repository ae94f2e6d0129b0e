use sqlx::{Postgres, QueryBuilder};

/// A public field name resolved to its SQL column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub name: String,
    pub column: &'static str,
}

impl FieldRef {
    pub fn new(name: impl Into<String>, column: &'static str) -> Self {
        Self {
            name: name.into(),
            column,
        }
    }
}

/// One narrowing step. A query matches when every predicate matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// At least one of `fields` contains `term`, ignoring case.
    Contains { fields: Vec<FieldRef>, term: String },

    /// The text form of `field` equals `value`.
    Equals { field: FieldRef, value: String },

    /// Matches nothing: a filter on a field the collection does not have,
    /// or a value no stored text can contain.
    Unsatisfiable { field: String },
}

/// Postgres text cannot hold NUL, so a value containing one never matches
/// and must not be sent to the server.
pub(crate) fn storable(value: &str) -> bool {
    !value.contains('\0')
}

/// In-memory view of a record, for evaluating predicates without a database.
pub trait Document {
    /// Text form of a public field, or `None` if the record has no such field.
    fn field_text(&self, field: &str) -> Option<String>;
}

impl Predicate {
    pub fn matches<D: Document + ?Sized>(&self, doc: &D) -> bool {
        match self {
            Self::Contains { fields, term } => {
                let term = term.to_lowercase();
                fields.iter().any(|field| {
                    doc.field_text(&field.name)
                        .is_some_and(|text| text.to_lowercase().contains(&term))
                })
            }
            Self::Equals { field, value } => {
                doc.field_text(&field.name).as_deref() == Some(value.as_str())
            }
            Self::Unsatisfiable { .. } => false,
        }
    }

    /// Appends this predicate as a parenthesized SQL condition.
    pub fn push_sql<'args>(&self, qb: &mut QueryBuilder<'args, Postgres>) {
        match self {
            Self::Contains { fields, term } => {
                if fields.is_empty() {
                    qb.push("FALSE");
                    return;
                }

                let pattern = format!("%{}%", escape_like(term));
                qb.push("(");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        qb.push(" OR ");
                    }
                    qb.push(field.column)
                        .push(" ILIKE ")
                        .push_bind(pattern.clone())
                        .push(" ESCAPE '\\'");
                }
                qb.push(")");
            }
            Self::Equals { field, value } => {
                qb.push("(CAST(")
                    .push(field.column)
                    .push(" AS TEXT) = ")
                    .push_bind(value.clone())
                    .push(")");
            }
            Self::Unsatisfiable { .. } => {
                qb.push("FALSE");
            }
        }
    }
}

/// Escapes `LIKE` wildcards so `term` matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
