//! Inventory API 模块 (库存管理)

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", inventory_routes())
}

fn inventory_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/daily-reset", post(handler::daily_reset))
        .route("/low-stock", get(handler::low_stock))
        .route("/out-of-stock", get(handler::out_of_stock))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/stock/add", post(handler::add_stock))
        .route("/{id}/stock/remove", post(handler::remove_stock))
        .route("/{id}/history", get(handler::history))
        .route("/{id}/type", put(handler::update_type))
}
