//! Client for the Shopify Admin checkout (cart) API
//!
//! The checkout resource only supports replacing the entire line-item list;
//! there is no append or single-line patch. Callers that need incremental
//! semantics build the full next state and call [`ShopifyClient::set_line_items`].

mod checkout;
mod config;
mod error;

pub use checkout::ShopifyClient;
pub use config::ShopifyConfig;
pub use error::{ClientError, ClientResult};
