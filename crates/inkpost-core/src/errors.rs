//! Application errors and failure classification.
//!
//! Every failure raised while serving a request ends up as an [`AppError`].
//! Turning it into a response goes through [`AppError::classify`], which maps
//! the failure onto one of the canonical [`ErrorKind`]s and produces an
//! [`ErrorEnvelope`]: a status code, a summary message, and one or more
//! [`ErrorSource`]s pointing at what went wrong.
//!
//! # Classification precedence
//!
//! | Kind                      | Source                                          | Status | Message                 |
//! |---------------------------|-------------------------------------------------|--------|-------------------------|
//! | `SchemaValidation`        | request body validation / malformed JSON        | 400    | `Validation Error`      |
//! | `PersistenceValidation`   | SQLSTATE 23502, 23514, 23503, 22001             | 400    | `Validation Error`      |
//! | `PersistenceCast`         | malformed path id, SQLSTATE 22P02               | 400    | `Invalid ID`            |
//! | `PersistenceDuplicateKey` | SQLSTATE 23505                                  | 400    | `Duplicate Entry`       |
//! | `Application`             | errors raised deliberately by services          | own    | own                     |
//! | `Generic`                 | anything else, including panics                 | 500    | `Internal Server Error` |
//!
//! # Example
//!
//! ```ignore
//! use inkpost_core::errors::AppError;
//!
//! async fn handler() -> Result<Json<Blog>, AppError> {
//!     let blog = find_blog(id).await?; // sqlx::Error converts automatically
//!     blog.ok_or_else(|| AppError::not_found("Blog does not exist"))
//! }
//! ```

use std::any::Any;
use std::borrow::Cow;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::error::DatabaseError;
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Fallback error source message when a failure carries no usable text.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

const NOT_NULL_VIOLATION: &str = "23502";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
const INVALID_TEXT_REPRESENTATION: &str = "22P02";

/// The canonical failure kinds, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SchemaValidation,
    PersistenceValidation,
    PersistenceCast,
    PersistenceDuplicateKey,
    Application,
    Generic,
}

/// A single pointer to what went wrong.
///
/// `path` is the last segment of the offending field's location, or `""`
/// when the failure is not tied to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorSource {
    pub path: String,
    pub message: String,
}

impl ErrorSource {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result of classifying a failure.
///
/// `error_sources` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
    pub error_sources: Vec<ErrorSource>,
}

impl ErrorEnvelope {
    pub fn new(
        kind: ErrorKind,
        status: StatusCode,
        message: impl Into<String>,
        mut error_sources: Vec<ErrorSource>,
    ) -> Self {
        let message = message.into();
        if error_sources.is_empty() {
            error_sources.push(ErrorSource::new("", message.clone()));
        }

        Self {
            kind,
            status,
            message,
            error_sources,
        }
    }

    fn validation(kind: ErrorKind, error_sources: Vec<ErrorSource>) -> Self {
        Self::new(kind, StatusCode::BAD_REQUEST, "Validation Error", error_sources)
    }

    fn generic(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNEXPECTED_ERROR.to_string()
        } else {
            message
        };

        Self::new(
            ErrorKind::Generic,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            vec![ErrorSource::new("", message)],
        )
    }
}

/// Application error type.
///
/// Services and extractors return this; it converts into the canonical
/// error response through [`IntoResponse`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body failed schema validation.
    #[error("request validation failed")]
    Validation(Vec<ErrorSource>),

    /// A path identifier could not be parsed.
    #[error("invalid {path}: {value}")]
    InvalidId { path: String, value: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A failure raised on purpose, with its own status and message.
    #[error("{message}")]
    Application { status: StatusCode, message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),

    /// A handler panicked. Holds the payload when it was a string.
    #[error("handler panicked: {}", .0.as_deref().unwrap_or(UNEXPECTED_ERROR))]
    Panic(Option<String>),
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Application {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, message)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn invalid_id(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidId {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Builds an error from a caught panic payload.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            Some((*s).to_string())
        } else {
            payload.downcast_ref::<String>().cloned()
        };

        Self::Panic(message)
    }

    /// Maps this failure onto its canonical kind and envelope.
    pub fn classify(&self) -> ErrorEnvelope {
        match self {
            Self::Validation(sources) => {
                ErrorEnvelope::validation(ErrorKind::SchemaValidation, sources.clone())
            }
            Self::InvalidId { path, value } => ErrorEnvelope::new(
                ErrorKind::PersistenceCast,
                StatusCode::BAD_REQUEST,
                "Invalid ID",
                vec![ErrorSource::new(
                    path.clone(),
                    format!("{value} is not a valid ID"),
                )],
            ),
            Self::Database(err) => classify_database(err),
            Self::Application { status, message } => ErrorEnvelope::new(
                ErrorKind::Application,
                *status,
                message.clone(),
                vec![ErrorSource::new("", message.clone())],
            ),
            Self::Internal(err) => ErrorEnvelope::generic(err.to_string()),
            Self::Panic(payload) => {
                ErrorEnvelope::generic(payload.clone().unwrap_or_default())
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.classify().kind
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut sources = Vec::new();
        collect_sources(&errors, &mut sources);
        Self::Validation(sources)
    }
}

fn collect_sources(errors: &ValidationErrors, sources: &mut Vec<ErrorSource>) {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in entries {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    sources.push(ErrorSource::new(field.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_sources(nested, sources),
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    collect_sources(nested, sources);
                }
            }
        }
    }
}

/// The parts of a database error that classification looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatabaseFailure {
    pub code: Option<String>,
    pub message: String,
    pub detail: Option<String>,
    pub column: Option<String>,
    pub constraint: Option<String>,
}

impl DatabaseFailure {
    pub fn from_database_error(err: &dyn DatabaseError) -> Self {
        let pg = err.try_downcast_ref::<PgDatabaseError>();

        Self {
            code: err.code().map(Cow::into_owned),
            message: err.message().to_string(),
            detail: pg.and_then(|e| e.detail()).map(str::to_string),
            column: pg.and_then(|e| e.column()).map(str::to_string),
            constraint: err.constraint().map(str::to_string),
        }
    }

    pub fn classify(&self) -> ErrorEnvelope {
        match self.code.as_deref() {
            Some(
                NOT_NULL_VIOLATION
                | CHECK_VIOLATION
                | FOREIGN_KEY_VIOLATION
                | STRING_DATA_RIGHT_TRUNCATION,
            ) => ErrorEnvelope::validation(
                ErrorKind::PersistenceValidation,
                vec![ErrorSource::new(self.field_path(), self.message.clone())],
            ),
            Some(INVALID_TEXT_REPRESENTATION) => ErrorEnvelope::new(
                ErrorKind::PersistenceCast,
                StatusCode::BAD_REQUEST,
                "Invalid ID",
                vec![ErrorSource::new(self.field_path(), self.message.clone())],
            ),
            Some(UNIQUE_VIOLATION) => {
                let source = self
                    .duplicate_key()
                    .map(|(field, value)| {
                        ErrorSource::new(field, format!("{field} \"{value}\" already exists"))
                    })
                    .unwrap_or_else(|| ErrorSource::new(self.field_path(), self.message.clone()));

                ErrorEnvelope::new(
                    ErrorKind::PersistenceDuplicateKey,
                    StatusCode::BAD_REQUEST,
                    "Duplicate Entry",
                    vec![source],
                )
            }
            _ => ErrorEnvelope::generic(self.message.clone()),
        }
    }

    fn field_path(&self) -> String {
        self.column
            .clone()
            .or_else(|| self.constraint.clone())
            .unwrap_or_default()
    }

    /// Field and value from a `Key (field)=(value) already exists.` detail.
    fn duplicate_key(&self) -> Option<(&str, &str)> {
        self.detail
            .as_deref()
            .and_then(parse_duplicate_detail)
            .or_else(|| parse_duplicate_detail(&self.message))
    }
}

fn parse_duplicate_detail(text: &str) -> Option<(&str, &str)> {
    let start = text.find("Key (")? + "Key (".len();
    let (field, rest) = text[start..].split_once(")=(")?;
    let (value, _) = rest.rsplit_once(") already exists")?;
    Some((field, value))
}

fn classify_database(err: &sqlx::Error) -> ErrorEnvelope {
    match err {
        sqlx::Error::Database(db_err) => {
            DatabaseFailure::from_database_error(&**db_err).classify()
        }
        other => ErrorEnvelope::generic(other.to_string()),
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    pub error: Vec<ErrorSource>,
    pub stack: Option<String>,
}

/// Classified failure attached to error responses as an extension.
///
/// Lets outer middleware re-render the body, e.g. to expose the stack
/// in development.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub envelope: ErrorEnvelope,
    pub trace: String,
}

impl ErrorReport {
    pub fn new(error: &AppError) -> Self {
        Self {
            envelope: error.classify(),
            trace: format!("{error:?}"),
        }
    }

    pub fn body(&self, expose_stack: bool) -> ErrorBody {
        ErrorBody {
            success: false,
            message: self.envelope.message.clone(),
            status_code: self.envelope.status.as_u16(),
            error: self.envelope.error_sources.clone(),
            stack: expose_stack.then(|| self.trace.clone()),
        }
    }

    pub fn render(&self, expose_stack: bool) -> Response {
        let mut response = (self.envelope.status, Json(self.body(expose_stack))).into_response();
        response.extensions_mut().insert(self.clone());
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport::new(&self);

        if report.envelope.status.is_server_error() {
            tracing::error!(
                kind = ?report.envelope.kind,
                error = %self,
                trace = %report.trace,
                "Request failed with an internal error"
            );
        }

        report.render(false)
    }
}
