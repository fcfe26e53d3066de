//! Bridge server configuration

/// Server configuration
///
/// Client credentials (Shopify Admin token, Printful API key) are read by
/// the respective client crates; this covers only the server itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub port: u16,
    /// Shared secret for webhook signature verification.
    ///
    /// Kept optional so the service can start without it, but the webhook
    /// gateway fails closed: with no secret configured every delivery is
    /// refused with 500, never accepted unverified.
    pub webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let webhook_secret = std::env::var("SHOPIFY_WEBHOOK_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        if webhook_secret.is_none() {
            tracing::warn!(
                "CRITICAL: SHOPIFY_WEBHOOK_SECRET is not set. All webhook deliveries will be refused."
            );
        }

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            webhook_secret,
        }
    }
}
