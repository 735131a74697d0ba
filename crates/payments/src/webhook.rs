//! Webhook event envelope and signature verification.
//!
//! The provider signs every delivery with HMAC-SHA256 over the raw request
//! body, sending the hex digest in the `X-Payment-Signature` header. The
//! handler must verify against the raw bytes before parsing JSON.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use staybook_core::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Event type emitted when a payment intent completes successfully.
pub const EVENT_INTENT_SUCCEEDED: &str = "payment_intent.succeeded";

/// A webhook event envelope from the payment provider.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    /// Event type, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// The payment intent the event is about.
    pub data: WebhookIntent,
}

/// Intent payload inside a webhook event.
#[derive(Debug, Deserialize)]
pub struct WebhookIntent {
    /// Provider-assigned intent identifier.
    pub id: String,
    #[serde(default)]
    pub metadata: WebhookMetadata,
}

/// Metadata echoed back from intent creation.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookMetadata {
    /// The booking this intent pays for, as set at intent creation.
    pub booking_id: Option<String>,
}

impl WebhookIntent {
    /// Parse the booking id out of the intent metadata.
    pub fn booking_id(&self) -> Option<DbId> {
        self.metadata.booking_id.as_deref()?.parse().ok()
    }
}

/// Verify an HMAC-SHA256 webhook signature (hex-encoded) over the raw body.
///
/// Comparison is constant-time via [`Mac::verify_slice`].
pub fn verify_signature(secret: &str, body: &[u8], signature_hex: &str) -> bool {
    let Ok(expected) = hex_decode(signature_hex) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the hex HMAC-SHA256 signature for a body (used by tests and
/// by provider simulators).
pub fn sign_body(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, ()> {
    // Works on bytes so non-ASCII input is rejected rather than sliced
    // mid-character.
    let bytes = s.as_bytes();
    if bytes.len() % 2 != 0 {
        return Err(());
    }
    bytes
        .chunks(2)
        .map(|pair| Ok(hex_val(pair[0])? << 4 | hex_val(pair[1])?))
        .collect()
}

fn hex_val(b: u8) -> Result<u8, ()> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    #[test]
    fn valid_signature_verifies() {
        let body = br#"{"type":"payment_intent.succeeded"}"#;
        let sig = sign_body(SECRET, body);
        assert!(verify_signature(SECRET, body, &sig));
    }

    #[test]
    fn tampered_body_fails() {
        let sig = sign_body(SECRET, b"original");
        assert!(!verify_signature(SECRET, b"tampered", &sig));
    }

    #[test]
    fn wrong_secret_fails() {
        let body = b"payload";
        let sig = sign_body("other_secret", body);
        assert!(!verify_signature(SECRET, body, &sig));
    }

    #[test]
    fn malformed_hex_fails() {
        assert!(!verify_signature(SECRET, b"payload", "not-hex"));
        assert!(!verify_signature(SECRET, b"payload", "abc"));
        // Multi-byte UTF-8 of even byte length must be rejected, not sliced.
        assert!(!verify_signature(SECRET, b"payload", "áá"));
    }

    #[test]
    fn event_parsing_extracts_booking_id() {
        let json = r#"{
            "type": "payment_intent.succeeded",
            "data": { "id": "pi_123", "metadata": { "booking_id": "42" } }
        }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EVENT_INTENT_SUCCEEDED);
        assert_eq!(event.data.id, "pi_123");
        assert_eq!(event.data.booking_id(), Some(42));
    }

    #[test]
    fn missing_metadata_yields_no_booking_id() {
        let json = r#"{ "type": "payment_intent.created", "data": { "id": "pi_9" } }"#;
        let event: WebhookEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.data.booking_id(), None);
    }
}
