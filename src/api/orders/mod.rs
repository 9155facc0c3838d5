//! Order API 模块

mod handler;

pub use handler::RemoveItemResponse;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_mine).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::cancel))
        .route("/{id}/items/{index}", put(handler::remove_item))
}
