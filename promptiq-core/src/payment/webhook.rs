use std::time::Duration;

use chrono::{DateTime, Utc};
use ring::hmac;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::{PaymentError, PaymentResult};

/// Header carrying the provider signature, e.g. `t=1492774577,v1=5257a8...`.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// A verified, decoded webhook event. Dispatch is for logging only; no state
/// mutation happens on this path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    CheckoutSessionCompleted { session_id: String },
    PaymentSucceeded { payment_intent_id: String },
    PaymentFailed { payment_intent_id: String },
    Other { kind: String },
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    kind: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: EventObject,
}

#[derive(Debug, Deserialize)]
struct EventObject {
    #[serde(default)]
    id: String,
}

/// Verifies provider signatures over raw webhook payloads. The signed payload
/// is `"{t}.{body}"` under HMAC-SHA256 with the shared endpoint secret.
pub struct WebhookVerifier {
    key: hmac::Key,
    tolerance: Duration,
}

impl WebhookVerifier {
    pub fn new(secret: &SecretString, tolerance: Duration) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.expose_secret().as_bytes()),
            tolerance,
        }
    }

    /// Verify the signature header against `payload` and decode the event.
    /// Timestamps older than the tolerance window are rejected even when the
    /// signature itself is valid.
    pub fn verify(
        &self,
        payload: &str,
        signature_header: &str,
        now: DateTime<Utc>,
    ) -> PaymentResult<WebhookEvent> {
        let (timestamp, signatures) = parse_signature_header(signature_header)?;

        if (now.timestamp() - timestamp).unsigned_abs() > self.tolerance.as_secs() {
            return Err(PaymentError::StaleSignature);
        }

        let signed_payload = format!("{}.{}", timestamp, payload);
        let verified = signatures.iter().any(|signature| {
            hex::decode(signature)
                .is_ok_and(|bytes| hmac::verify(&self.key, signed_payload.as_bytes(), &bytes).is_ok())
        });
        if !verified {
            return Err(PaymentError::InvalidSignature);
        }

        decode_event(payload)
    }
}

/// Build a signature header for `payload` as the provider would. Intended for
/// local webhook simulation and tests.
pub fn signature_header(secret: &SecretString, timestamp: i64, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.expose_secret().as_bytes());
    let signed_payload = format!("{}.{}", timestamp, payload);
    let tag = hmac::sign(&key, signed_payload.as_bytes());
    format!("t={},v1={}", timestamp, hex::encode(tag.as_ref()))
}

fn parse_signature_header(header: &str) -> PaymentResult<(i64, Vec<String>)> {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signatures.push(value.to_string()),
            _ => {}
        }
    }
    match timestamp {
        Some(t) if !signatures.is_empty() => Ok((t, signatures)),
        _ => Err(PaymentError::InvalidSignature),
    }
}

fn decode_event(payload: &str) -> PaymentResult<WebhookEvent> {
    let envelope: EventEnvelope =
        serde_json::from_str(payload).map_err(|e| PaymentError::MalformedEvent(e.to_string()))?;
    let event = match envelope.kind.as_str() {
        "checkout.session.completed" => WebhookEvent::CheckoutSessionCompleted {
            session_id: envelope.data.object.id,
        },
        "payment_intent.succeeded" => WebhookEvent::PaymentSucceeded {
            payment_intent_id: envelope.data.object.id,
        },
        "payment_intent.payment_failed" => WebhookEvent::PaymentFailed {
            payment_intent_id: envelope.data.object.id,
        },
        _ => WebhookEvent::Other {
            kind: envelope.kind,
        },
    };
    debug!(?event, "decoded webhook event");
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETED_PAYLOAD: &str =
        r#"{"type": "checkout.session.completed", "data": {"object": {"id": "cs_test_a1b2c3"}}}"#;

    fn verifier(secret: &str) -> WebhookVerifier {
        WebhookVerifier::new(
            &SecretString::from(secret.to_string()),
            Duration::from_secs(300),
        )
    }

    #[test]
    fn test_valid_signature_decodes_event() {
        let secret = SecretString::from("whsec_test".to_string());
        let now = Utc::now();
        let header = signature_header(&secret, now.timestamp(), COMPLETED_PAYLOAD);

        let event = verifier("whsec_test")
            .verify(COMPLETED_PAYLOAD, &header, now)
            .unwrap();
        assert_eq!(
            event,
            WebhookEvent::CheckoutSessionCompleted {
                session_id: "cs_test_a1b2c3".to_string()
            }
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let secret = SecretString::from("whsec_test".to_string());
        let now = Utc::now();
        let header = signature_header(&secret, now.timestamp(), COMPLETED_PAYLOAD);

        let tampered = COMPLETED_PAYLOAD.replace("cs_test_a1b2c3", "cs_test_evil");
        let err = verifier("whsec_test")
            .verify(&tampered, &header, now)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let secret = SecretString::from("whsec_other".to_string());
        let now = Utc::now();
        let header = signature_header(&secret, now.timestamp(), COMPLETED_PAYLOAD);

        let err = verifier("whsec_test")
            .verify(COMPLETED_PAYLOAD, &header, now)
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let secret = SecretString::from("whsec_test".to_string());
        let now = Utc::now();
        let stale = now.timestamp() - 600;
        let header = signature_header(&secret, stale, COMPLETED_PAYLOAD);

        let err = verifier("whsec_test")
            .verify(COMPLETED_PAYLOAD, &header, now)
            .unwrap_err();
        assert!(matches!(err, PaymentError::StaleSignature));
    }

    #[test]
    fn test_garbage_header_rejected() {
        let err = verifier("whsec_test")
            .verify(COMPLETED_PAYLOAD, "not-a-signature", Utc::now())
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[test]
    fn test_unknown_event_kind_maps_to_other() {
        let payload = r#"{"type": "invoice.paid", "data": {"object": {"id": "in_123"}}}"#;
        let secret = SecretString::from("whsec_test".to_string());
        let now = Utc::now();
        let header = signature_header(&secret, now.timestamp(), payload);

        let event = verifier("whsec_test").verify(payload, &header, now).unwrap();
        assert_eq!(
            event,
            WebhookEvent::Other {
                kind: "invoice.paid".to_string()
            }
        );
    }

    #[test]
    fn test_verified_but_malformed_payload() {
        let payload = "not json";
        let secret = SecretString::from("whsec_test".to_string());
        let now = Utc::now();
        let header = signature_header(&secret, now.timestamp(), payload);

        let err = verifier("whsec_test").verify(payload, &header, now).unwrap_err();
        assert!(matches!(err, PaymentError::MalformedEvent(_)));
    }
}
