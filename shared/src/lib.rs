//! Shared types for the beanbridge workspace
//!
//! Common types used across the server and client crates: inbound storefront
//! order payloads, cart/checkout structures, fulfillment order payloads,
//! error types and the standard API response envelope.

pub mod cart;
pub mod error;
pub mod fulfillment;
pub mod order;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use response::ApiResponse;
