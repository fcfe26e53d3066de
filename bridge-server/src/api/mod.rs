//! API routes for bridge-server

pub mod cart;
pub mod health;
pub mod shopify_webhook;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Cart API (session-scoped checkouts)
    let cart = Router::new()
        .route("/api/cart", post(cart::create_cart).get(cart::get_cart))
        .route("/api/cart/items", post(cart::add_items))
        .route(
            "/api/cart/{checkout_id}/items/{line_item_id}",
            put(cart::update_item).delete(cart::remove_item),
        );

    // Order webhook (signature-verified, raw body)
    let webhook = Router::new().route(
        "/api/webhooks/shopify/orders",
        post(shopify_webhook::handle_order_webhook),
    );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(cart)
        .merge(webhook)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
