//! Printful client error types

use thiserror::Error;

/// Printful client error type.
///
/// Callers distinguish four failure classes: configuration (raised before
/// any network call), request construction/sending, no response received,
/// and a non-2xx answer carrying provider detail.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid client configuration
    #[error("Printful configuration error: {0}")]
    Config(String),

    /// Failure constructing or sending the request
    #[error("Printful request error: {0}")]
    Request(String),

    /// Request sent but no response received (timeout, connection failure)
    #[error("Printful unreachable: {0}")]
    Network(String),

    /// Non-2xx response from Printful, with provider error detail
    #[error("Printful API error ({status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// 2xx response whose body could not be decoded
    #[error("Invalid Printful response: {0}")]
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

/// Result type for Printful client operations
pub type ClientResult<T> = Result<T, ClientError>;
