//! Webhook gateway internals

pub mod signature;

pub use signature::verify_webhook_signature;
