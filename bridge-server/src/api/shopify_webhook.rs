//! Shopify order webhook handler
//!
//! POST /api/webhooks/shopify/orders — signature-verified order ingestion
//! (raw body; the signature covers the exact bytes Shopify sent).

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use shared::order::StorefrontOrder;

use crate::state::AppState;
use crate::transform;
use crate::webhook;

/// Header carrying the base64 HMAC-SHA256 digest of the raw body
pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";

/// Handle an incoming order-created webhook.
///
/// Status contract: 500 secret not configured (fail closed), 401 header
/// absent, 403 signature mismatch, 400 malformed payload after a verified
/// signature, 200 otherwise — including when downstream fulfillment fails,
/// so Shopify does not hammer us with redeliveries for errors a retry
/// cannot fix.
pub async fn handle_order_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    // 1. Fail closed when no secret is configured: never accept unverified
    let Some(secret) = state.webhook_secret.as_deref() else {
        tracing::error!("Webhook secret is not configured, refusing delivery");
        return StatusCode::INTERNAL_SERVER_ERROR;
    };

    // 2. Signature header must be present
    let Some(signature) = headers.get(HMAC_HEADER).and_then(|v| v.to_str().ok()) else {
        tracing::warn!("Received webhook without HMAC signature header");
        return StatusCode::UNAUTHORIZED;
    };

    // 3. Verify over the raw bytes, constant-time
    if let Err(e) = webhook::verify_webhook_signature(&body, signature, secret) {
        tracing::warn!(error = e, "Webhook signature verification failed");
        return StatusCode::FORBIDDEN;
    }

    // 4. Only a verified payload gets decoded. Failure here is a client
    //    payload error, not an authentication error.
    let order: StorefrontOrder = match serde_json::from_slice(&body) {
        Ok(o) => o,
        Err(e) => {
            tracing::warn!(%e, "Verified webhook payload failed to parse");
            return StatusCode::BAD_REQUEST;
        }
    };

    tracing::info!(
        order_id = order.id,
        order_name = order.name.as_deref().unwrap_or(""),
        "Received and verified order webhook"
    );

    // 5. Transform and submit. Errors past this point are logged, not
    //    surfaced: the delivery was valid.
    process_order(&state, &order).await;

    StatusCode::OK
}

/// Forward the order's eligible items to Printful as a draft order.
async fn process_order(state: &AppState, order: &StorefrontOrder) {
    let Some(draft) = transform::transform_order(order) else {
        return;
    };

    let Some(printful) = &state.printful else {
        tracing::error!(
            order_id = order.id,
            "Printful client is not configured, cannot forward order"
        );
        return;
    };

    tracing::info!(
        order_id = order.id,
        items = draft.items.len(),
        external_id = %draft.external_id,
        "Forwarding items to Printful"
    );

    match printful.create_order(&draft).await {
        Ok(submitted) => {
            tracing::info!(
                order_id = order.id,
                printful_id = submitted.id,
                "Draft fulfillment order created"
            );
        }
        Err(e) => {
            // Operators watch for this; Shopify still gets a 200.
            tracing::error!(order_id = order.id, error = %e, "Failed to submit fulfillment order");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const SECRET: &str = "topsecret";

    fn test_state(secret: Option<&str>) -> AppState {
        AppState {
            webhook_secret: secret.map(String::from),
            printful: None,
            carts: None,
        }
    }

    fn sign(payload: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
        mac.update(payload);
        BASE64.encode(mac.finalize().into_bytes())
    }

    fn signed_headers(payload: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HMAC_HEADER, sign(payload).parse().unwrap());
        headers
    }

    /// Valid order body with no Printful items, so processing is a no-op
    fn order_body() -> Vec<u8> {
        serde_json::json!({
            "id": 4242,
            "name": "#1001",
            "customer": { "email": "ada@example.com" },
            "shipping_address": null,
            "line_items": [
                { "vendor": "In-House", "sku": "ESP-1", "title": "Espresso", "price": "3.50", "quantity": 1 }
            ],
            "currency": "USD",
            "subtotal_price": "3.50",
            "shipping_lines": [],
            "total_tax": "0.00"
        })
        .to_string()
        .into_bytes()
    }

    #[tokio::test]
    async fn missing_secret_fails_closed_with_500() {
        let body = order_body();
        let status = handle_order_webhook(
            State(test_state(None)),
            signed_headers(&body),
            Bytes::from(body),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let body = order_body();
        let status = handle_order_webhook(
            State(test_state(Some(SECRET))),
            HeaderMap::new(),
            Bytes::from(body),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn tampered_body_is_403() {
        let body = order_body();
        let headers = signed_headers(&body);

        let mut tampered = body.clone();
        tampered[0] ^= 0x01;
        let status =
            handle_order_webhook(State(test_state(Some(SECRET))), headers, Bytes::from(tampered))
                .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn verified_but_malformed_json_is_400() {
        let body = b"not json at all".to_vec();
        let status = handle_order_webhook(
            State(test_state(Some(SECRET))),
            signed_headers(&body),
            Bytes::from(body),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn verified_order_is_accepted() {
        let body = order_body();
        let status = handle_order_webhook(
            State(test_state(Some(SECRET))),
            signed_headers(&body),
            Bytes::from(body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
