//! Client for the Printful fulfillment API
//!
//! Orders are always submitted in draft mode; nothing is manufactured or
//! shipped until [`PrintfulClient::confirm_order`] is explicitly invoked.

mod config;
mod error;
mod orders;

pub use config::PrintfulConfig;
pub use error::{ClientError, ClientResult};
pub use orders::{PrintfulClient, SubmittedOrder};
