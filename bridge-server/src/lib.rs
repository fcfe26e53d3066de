//! bridge-server — storefront-to-fulfillment bridge
//!
//! Two independent pipelines share this service:
//!
//! - **Webhook ingestion** (`api::shopify_webhook`, `webhook`, `transform`):
//!   authenticate a signed Shopify order webhook, map the eligible items to
//!   a Printful draft order, submit it.
//! - **Cart reconciliation** (`cart`): express incremental add/update/remove
//!   intents against a remote checkout resource that only supports replacing
//!   its entire line-item set.

pub mod api;
pub mod cart;
pub mod config;
pub mod state;
pub mod transform;
pub mod webhook;

pub use config::Config;
pub use state::AppState;
