use axum::{
    Router,
    routing::{delete, patch},
};

use crate::modules::admin::controller::{block_user, delete_blog};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users/{userId}/block", patch(block_user))
        .route("/blogs/{id}", delete(delete_blog))
}
