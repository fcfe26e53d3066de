//! Shopify client configuration

use crate::{ClientError, ClientResult};

/// Default Admin API version when none is configured
pub const DEFAULT_API_VERSION: &str = "2024-01";

/// Shopify Admin API configuration
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// Shop subdomain, e.g. "my-coffee-shop" for my-coffee-shop.myshopify.com
    pub shop_name: String,
    /// Admin API access token
    pub access_token: String,
    /// Admin API version, e.g. "2024-01"
    pub api_version: String,
    /// Overrides the shop-derived base URL when set; test servers
    pub base_url_override: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ShopifyConfig {
    /// Load configuration from environment variables.
    ///
    /// `SHOPIFY_SHOP_NAME` and `SHOPIFY_API_PASSWORD` (the Admin API access
    /// token) are required; a missing value is a configuration error raised
    /// before any network call.
    pub fn from_env() -> ClientResult<Self> {
        let shop_name = std::env::var("SHOPIFY_SHOP_NAME")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClientError::Config("SHOPIFY_SHOP_NAME is not set".into()))?;
        let access_token = std::env::var("SHOPIFY_API_PASSWORD")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ClientError::Config("SHOPIFY_API_PASSWORD is not set".into()))?;

        Ok(Self {
            shop_name,
            access_token,
            api_version: std::env::var("SHOPIFY_API_VERSION")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_VERSION.into()),
            base_url_override: std::env::var("SHOPIFY_API_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            timeout_secs: std::env::var("SHOPIFY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Admin API base URL for this shop and version
    pub fn base_url(&self) -> String {
        match &self.base_url_override {
            Some(url) => url.clone(),
            None => format!(
                "https://{}.myshopify.com/admin/api/{}",
                self.shop_name, self.api_version
            ),
        }
    }
}
