//! Shopify webhook signature verification (HMAC-SHA256)

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Verify a Shopify webhook signature.
///
/// `payload` must be the exact raw bytes of the request body — verifying a
/// re-serialized parse of the body can silently diverge from what the sender
/// signed. `signature_b64` is the `X-Shopify-Hmac-Sha256` header value: the
/// base64-encoded HMAC-SHA256 digest of the body under the shared secret.
///
/// The comparison is constant-time via `Mac::verify_slice`.
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_b64: &str,
    secret: &str,
) -> Result<(), &'static str> {
    let sig_bytes = BASE64
        .decode(signature_b64)
        .map_err(|_| "Invalid signature encoding")?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(payload);

    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        BASE64.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn accepts_matching_signature() {
        let payload = br#"{"id":123,"line_items":[]}"#;
        let sig = sign(payload, "topsecret");
        assert!(verify_webhook_signature(payload, &sig, "topsecret").is_ok());
    }

    #[test]
    fn rejects_single_byte_tamper() {
        let payload = br#"{"id":123,"line_items":[]}"#.to_vec();
        let sig = sign(&payload, "topsecret");

        // Flip one byte anywhere in the payload
        for i in 0..payload.len() {
            let mut tampered = payload.clone();
            tampered[i] ^= 0x01;
            assert!(
                verify_webhook_signature(&tampered, &sig, "topsecret").is_err(),
                "tamper at byte {i} was not detected"
            );
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let payload = b"{}";
        let sig = sign(payload, "topsecret");
        assert!(verify_webhook_signature(payload, &sig, "other-secret").is_err());
    }

    #[test]
    fn rejects_malformed_base64() {
        assert!(verify_webhook_signature(b"{}", "not base64!!", "topsecret").is_err());
    }
}
