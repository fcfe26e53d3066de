//! Printful order submission

use reqwest::Client;
use serde::Deserialize;

use shared::fulfillment::DraftOrder;

use crate::{ClientError, ClientResult, PrintfulConfig};

/// HTTP client for the Printful orders API
#[derive(Debug, Clone)]
pub struct PrintfulClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Printful wraps every response as `{"code": ..., "result": ...}`
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[allow(dead_code)]
    code: i64,
    result: T,
}

/// Provider-assigned view of a submitted order
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedOrder {
    /// Printful's own order id
    pub id: i64,
    #[serde(default)]
    pub external_id: Option<String>,
    /// "draft" until confirmed for production
    pub status: String,
}

impl PrintfulClient {
    /// Create a new client from configuration
    pub fn new(config: &PrintfulConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Submit an order as a draft.
    ///
    /// `confirm=false` so a transient mis-submission never triggers
    /// irreversible physical fulfillment. Production confirmation is
    /// [`Self::confirm_order`], invoked separately.
    pub async fn create_order(&self, order: &DraftOrder) -> ClientResult<SubmittedOrder> {
        let url = format!("{}/orders", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .query(&[("confirm", "false")])
            .json(order)
            .send()
            .await?;
        let submitted = Self::handle_response(response).await?;

        tracing::info!(
            printful_id = submitted.id,
            external_id = %order.external_id,
            status = %submitted.status,
            "Submitted draft order to Printful"
        );
        Ok(submitted)
    }

    /// Confirm a draft order for production and shipping
    pub async fn confirm_order(&self, order_id: i64) -> ClientResult<SubmittedOrder> {
        let url = format!("{}/orders/{order_id}/confirm", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let confirmed = Self::handle_response(response).await?;

        tracing::info!(printful_id = confirmed.id, "Confirmed Printful order");
        Ok(confirmed)
    }

    async fn handle_response(response: reqwest::Response) -> ClientResult<SubmittedOrder> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                detail: extract_error_detail(&body),
            });
        }

        let envelope: ApiEnvelope<SubmittedOrder> = response.json().await?;
        Ok(envelope.result)
    }
}

/// Pull the human-readable error out of a Printful error body.
///
/// Error bodies look like `{"code": 400, "result": "...", "error":
/// {"reason": "...", "message": "..."}}`; fall back to the raw body when the
/// shape is unexpected.
fn extract_error_detail(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    value["result"]
        .as_str()
        .or_else(|| value["error"]["message"].as_str())
        .map(String::from)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_result_string_from_error_body() {
        let body = r#"{"code":400,"result":"Invalid variant id","error":{"message":"other"}}"#;
        assert_eq!(extract_error_detail(body), "Invalid variant id");
    }

    #[test]
    fn falls_back_to_error_message_then_raw_body() {
        let body = r#"{"code":400,"error":{"message":"Country not supported"}}"#;
        assert_eq!(extract_error_detail(body), "Country not supported");

        let raw = "upstream exploded";
        assert_eq!(extract_error_detail(raw), raw);
    }
}
