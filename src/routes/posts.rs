//! Post CRUD routes.

use crate::handlers::posts::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list).post(create))
        .route("/posts/:id", get(read).patch(update).delete(delete_handler))
        .with_state(state)
}
