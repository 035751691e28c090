//! Item routes. `GET /dashboard/items/:id` lists by user id while `PATCH`/`DELETE` on the same
//! path address an item id; the router needs one parameter name per segment.

use crate::handlers::items::{create_item, delete_item, list_session_items, list_user_items, update_item};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn item_routes(state: AppState) -> Router {
    Router::new()
        .route("/dashboard/items", get(list_session_items).post(create_item))
        .route(
            "/dashboard/items/:id",
            get(list_user_items).patch(update_item).delete(delete_item),
        )
        .with_state(state)
}
