pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use state::ApiState;

use axum::{Router, routing::get};

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/api/v1/items/{id}",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/api/v1/item-types", get(handlers::list_item_types))
        .with_state(state)
}
