//! Printful client configuration

use crate::{ClientError, ClientResult};

/// Default Printful API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.printful.com";

/// Printful API configuration
#[derive(Debug, Clone)]
pub struct PrintfulConfig {
    /// API key (Bearer token)
    pub api_key: String,
    /// API base URL; overridable for test servers
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PrintfulConfig {
    /// Load configuration from environment variables.
    ///
    /// A missing `PRINTFUL_API_KEY` is a configuration error raised here,
    /// before any network call is attempted.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("PRINTFUL_API_KEY")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClientError::Config("PRINTFUL_API_KEY is not set".into()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("PRINTFUL_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            timeout_secs: std::env::var("PRINTFUL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}
