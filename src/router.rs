use axum::http::{HeaderValue, Method};
use axum::{Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::errors::{handle_panic, not_found, present_errors};
use crate::middleware::rate_limit::{IpRateLimit, limit_by_ip};
use crate::middleware::role::require_admin;
use crate::modules::admin::init_admin_router;
use crate::modules::auth::init_auth_router;
use crate::modules::blogs::init_blogs_router;
use crate::state::AppState;

/// Builds the application router.
///
/// When rate limiting is enabled this spawns the limiter's pruning task,
/// so it must run inside a tokio runtime.
pub fn init_router(state: AppState) -> Router {
    let mut auth_router = init_auth_router();
    if let Some(limit) = IpRateLimit::from_config(&state.rate_limit_config) {
        limit.spawn_pruner();
        auth_router = auth_router.route_layer(middleware::from_fn_with_state(limit, limit_by_ip));
    }

    let routes = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth_router)
                .nest("/blogs", init_blogs_router(state.clone()))
                .nest(
                    "/admin",
                    init_admin_router()
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                ),
        )
        .method_not_allowed_fallback(not_found)
        .fallback(not_found);

    with_common_layers(routes, state)
}

/// Wraps `routes` in the layers every request passes through: panic
/// recovery, development error bodies, CORS and request logging.
pub fn with_common_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), present_errors))
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
