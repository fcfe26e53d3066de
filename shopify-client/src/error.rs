//! Shopify client error types

use thiserror::Error;

/// Shopify client error type.
///
/// The four failure classes a caller must be able to tell apart: the request
/// never left (`Config`/`Request`), it left but nothing came back
/// (`Network`), or the provider answered with a non-2xx (`Upstream`).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid client configuration
    #[error("Shopify configuration error: {0}")]
    Config(String),

    /// Failure constructing or sending the request
    #[error("Shopify request error: {0}")]
    Request(String),

    /// Request sent but no response received (timeout, connection failure)
    #[error("Shopify unreachable: {0}")]
    Network(String),

    /// Non-2xx response from Shopify, with the response body as detail
    #[error("Shopify API error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// 2xx response whose body could not be decoded
    #[error("Invalid Shopify response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            Self::Network(e.to_string())
        } else if e.is_decode() {
            Self::InvalidResponse(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Result type for Shopify client operations
pub type ClientResult<T> = Result<T, ClientError>;
