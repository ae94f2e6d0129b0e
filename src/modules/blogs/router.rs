use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::role::require_user;
use crate::modules::blogs::controller::{create_blog, delete_blog, get_all_blogs, update_blog};
use crate::state::AppState;

/// Reading is public; writing requires the `user` role.
pub fn init_blogs_router(state: AppState) -> Router<AppState> {
    let user_only = || middleware::from_fn_with_state(state.clone(), require_user);

    Router::new()
        .route(
            "/",
            get(get_all_blogs).merge(post(create_blog).route_layer(user_only())),
        )
        .route(
            "/{id}",
            patch(update_blog)
                .delete(delete_blog)
                .route_layer(user_only()),
        )
}
