use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use inkpost_core::{AppError, ErrorSource};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body that has been deserialized and validated.
///
/// Both decoding failures and rule violations are reported as schema
/// validation errors, so clients see one shape for "your body is wrong".
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn rejection_source(rejection: &JsonRejection) -> ErrorSource {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return ErrorSource::new(field, format!("{field} is required"));
    }

    if error_msg.contains("invalid type") {
        return ErrorSource::new("body", "Invalid field type in request");
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return ErrorSource::new("body", "Missing 'Content-Type: application/json' header");
    }

    ErrorSource::new("body", "Invalid request body")
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection_source(&rejection)]))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// The last path parameter, parsed as a record id.
///
/// A value that is not a UUID is a cast failure on that parameter and
/// never reaches the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub Uuid);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        let (name, value) = params
            .into_iter()
            .next_back()
            .ok_or_else(|| AppError::bad_request("Missing path parameter"))?;

        Uuid::parse_str(&value)
            .map(PathId)
            .map_err(|_| AppError::invalid_id(name, value))
    }
}
