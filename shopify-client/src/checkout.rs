//! Checkout (cart) resource client

use reqwest::Client;
use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;
use shared::cart::{Cart, CartLine};

use crate::{ClientError, ClientResult, ShopifyConfig};

/// HTTP client for the Shopify Admin checkout API
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    client: Client,
    base_url: String,
    access_token: String,
}

/// Wire representation of a checkout, wrapped as `{"checkout": {...}}`
#[derive(Debug, Serialize, Deserialize)]
struct CheckoutEnvelope {
    checkout: CheckoutResource,
}

#[derive(Debug, Serialize, Deserialize)]
struct CheckoutResource {
    token: String,
    #[serde(default)]
    line_items: Vec<CartLine>,
    #[serde(default)]
    subtotal_price: Option<Decimal>,
    #[serde(default)]
    total_tax: Option<Decimal>,
    #[serde(default)]
    total_price: Option<Decimal>,
    #[serde(default)]
    web_url: Option<String>,
}

impl From<CheckoutResource> for Cart {
    fn from(c: CheckoutResource) -> Self {
        Cart {
            id: c.token,
            line_items: c.line_items,
            subtotal_price: c.subtotal_price,
            total_tax: c.total_tax,
            total_price: c.total_price,
            checkout_url: c.web_url,
        }
    }
}

/// Write payload: only the line items are ever sent
#[derive(Debug, Serialize)]
struct LineItemsUpdate<'a> {
    checkout: LineItemsBody<'a>,
}

#[derive(Debug, Serialize)]
struct LineItemsBody<'a> {
    line_items: &'a [CartLine],
}

impl ShopifyClient {
    /// Create a new client from configuration
    pub fn new(config: &ShopifyConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            access_token: config.access_token.clone(),
        })
    }

    /// Create a new checkout, optionally seeded with line items
    pub async fn create_checkout(&self, items: &[CartLine]) -> ClientResult<Cart> {
        let url = format!("{}/checkouts.json", self.base_url);
        let body = LineItemsUpdate {
            checkout: LineItemsBody { line_items: items },
        };

        let response = self
            .client
            .post(&url)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&body)
            .send()
            .await?;
        let checkout = Self::handle_response(response).await?;
        tracing::info!(checkout_id = %checkout.token, "Created checkout");
        Ok(checkout.into())
    }

    /// Fetch the current checkout snapshot
    pub async fn get_checkout(&self, token: &str) -> ClientResult<Cart> {
        let url = format!("{}/checkouts/{token}.json", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("X-Shopify-Access-Token", &self.access_token)
            .send()
            .await?;
        Ok(Self::handle_response(response).await?.into())
    }

    /// Replace the checkout's entire line-item list.
    ///
    /// This is the only write the checkout resource supports: the list sent
    /// here becomes the complete next state. Lines carrying an id update the
    /// existing remote line; lines without one are created.
    pub async fn set_line_items(&self, token: &str, items: &[CartLine]) -> ClientResult<Cart> {
        let url = format!("{}/checkouts/{token}.json", self.base_url);
        let body = LineItemsUpdate {
            checkout: LineItemsBody { line_items: items },
        };

        let response = self
            .client
            .put(&url)
            .header("X-Shopify-Access-Token", &self.access_token)
            .json(&body)
            .send()
            .await?;
        let checkout = Self::handle_response(response).await?;
        tracing::info!(
            checkout_id = %checkout.token,
            lines = checkout.line_items.len(),
            "Replaced checkout line items"
        );
        Ok(checkout.into())
    }

    /// Classify the response: non-2xx becomes `Upstream` with the body as
    /// detail, a 2xx body that fails to decode becomes `InvalidResponse`.
    async fn handle_response(response: reqwest::Response) -> ClientResult<CheckoutResource> {
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let envelope: CheckoutEnvelope = response.json().await?;
        Ok(envelope.checkout)
    }
}
