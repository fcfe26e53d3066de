//! Cart reconciliation over a full-replace remote cart resource

pub mod engine;
pub mod locks;

pub use engine::{CartOp, CartService};
pub use locks::CartLocks;

use async_trait::async_trait;

use shared::cart::{Cart, CartLine};
use shared::error::{ApiError, ApiResult};
use shopify_client::{ClientError, ShopifyClient};

/// Remote cart resource seam.
///
/// The remote API exposes exactly three things: create, read a full
/// snapshot, and replace the full line-item set. The trait exists so the
/// reconciliation engine can run against a test double instead of the real
/// Shopify client.
#[async_trait]
pub trait CartBackend: Send + Sync {
    async fn create(&self, items: &[CartLine]) -> ApiResult<Cart>;
    async fn get(&self, cart_id: &str) -> ApiResult<Cart>;
    async fn replace(&self, cart_id: &str, items: &[CartLine]) -> ApiResult<Cart>;
}

#[async_trait]
impl CartBackend for ShopifyClient {
    async fn create(&self, items: &[CartLine]) -> ApiResult<Cart> {
        self.create_checkout(items).await.map_err(map_client_error)
    }

    async fn get(&self, cart_id: &str) -> ApiResult<Cart> {
        self.get_checkout(cart_id).await.map_err(map_client_error)
    }

    async fn replace(&self, cart_id: &str, items: &[CartLine]) -> ApiResult<Cart> {
        self.set_line_items(cart_id, items)
            .await
            .map_err(map_client_error)
    }
}

/// Map Shopify client errors into the service error taxonomy.
///
/// A remote 404 becomes NotFound (stale or mistyped checkout id); other
/// non-2xx responses surface as upstream errors with the provider detail.
fn map_client_error(e: ClientError) -> ApiError {
    match e {
        ClientError::Upstream { status: 404, .. } => ApiError::not_found("Cart"),
        ClientError::Upstream { status, detail } => ApiError::Upstream { status, detail },
        ClientError::Network(message) => ApiError::Network { message },
        ClientError::Config(message) => ApiError::Configuration { message },
        ClientError::Request(message) | ClientError::InvalidResponse(message) => {
            ApiError::internal(message)
        }
    }
}
