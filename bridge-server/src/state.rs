//! Application state for bridge-server

use std::sync::Arc;

use printful_client::{PrintfulClient, PrintfulConfig};
use shared::error::{ApiError, ApiResult};
use shopify_client::{ShopifyClient, ShopifyConfig};

use crate::cart::CartService;
use crate::config::Config;

/// Shared application state.
///
/// External clients are constructed once here and injected through the
/// state, never reached through globals. A client whose credentials are
/// missing stays `None`; the routes that need it refuse requests with a
/// configuration error instead of calling out unauthenticated.
#[derive(Clone)]
pub struct AppState {
    /// Webhook signature secret (None = fail closed with 500)
    pub webhook_secret: Option<String>,
    /// Printful fulfillment client
    pub printful: Option<PrintfulClient>,
    /// Cart reconciliation service over the Shopify checkout API
    pub carts: Option<CartService>,
}

impl AppState {
    /// Create a new AppState.
    ///
    /// Missing credentials are logged at startup (the service still comes
    /// up, matching the webhook gateway's fail-closed-per-request model).
    pub fn new(config: &Config) -> Self {
        let printful = match PrintfulConfig::from_env().and_then(|c| PrintfulClient::new(&c)) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!("CRITICAL: {e}. Order fulfillment will fail.");
                None
            }
        };

        let carts = match ShopifyConfig::from_env().and_then(|c| ShopifyClient::new(&c)) {
            Ok(client) => Some(CartService::new(Arc::new(client))),
            Err(e) => {
                tracing::warn!("CRITICAL: {e}. Cart operations will fail.");
                None
            }
        };

        Self {
            webhook_secret: config.webhook_secret.clone(),
            printful,
            carts,
        }
    }

    /// Cart service, or a configuration error when the Shopify client
    /// could not be constructed
    pub fn cart_service(&self) -> ApiResult<&CartService> {
        self.carts
            .as_ref()
            .ok_or_else(|| ApiError::configuration("Shopify client is not configured"))
    }
}
