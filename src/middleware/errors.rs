use std::any::Any;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use inkpost_core::{AppError, ErrorReport};

use crate::state::AppState;

/// Response for a handler panic, installed through `CatchPanicLayer::custom`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    AppError::from_panic(payload).into_response()
}

/// Fallback for routes that do not exist.
pub async fn not_found() -> AppError {
    AppError::not_found("API not Found")
}

/// Re-renders error responses with their stack when running in development.
pub async fn present_errors(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;

    if !state.environment.is_development() {
        return response;
    }

    let rendered = response
        .extensions()
        .get::<ErrorReport>()
        .map(|report| report.render(true));

    rendered.unwrap_or(response)
}
