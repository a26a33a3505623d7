use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use super::{PaymentError, PaymentResult};
use crate::config::CheckoutConfig;

/// Longest prompt excerpt attached to a session as metadata. Evaluation
/// always reads the full original text, never this copy.
pub const METADATA_PROMPT_CHARS: usize = 500;

const DESCRIPTION_PROMPT_CHARS: usize = 100;

/// A created hosted-checkout session.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
}

/// Thin client for the payment provider's checkout-session REST endpoint.
pub struct CheckoutClient {
    http: reqwest::Client,
    secret_key: SecretString,
    config: CheckoutConfig,
}

impl CheckoutClient {
    pub fn new(config: CheckoutConfig, secret_key: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key,
            config,
        }
    }

    /// Create a fixed-price checkout session for one evaluation. `origin`
    /// anchors the redirect URLs; the configured fallback is used when the
    /// request carried none.
    #[tracing::instrument(skip(self, prompt))]
    pub async fn create_session(
        &self,
        prompt: &str,
        origin: Option<&str>,
    ) -> PaymentResult<CheckoutSession> {
        let origin = origin.unwrap_or(&self.config.fallback_origin);
        let description = format!(
            "AI-powered prompt evaluation for: \"{}\"",
            truncate_chars(prompt, DESCRIPTION_PROMPT_CHARS)
        );

        let params: Vec<(&str, String)> = vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                self.config.unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                self.config.product_name.clone(),
            ),
            (
                "line_items[0][price_data][product_data][description]",
                description,
            ),
            (
                "success_url",
                format!("{}/results?session_id={{CHECKOUT_SESSION_ID}}", origin),
            ),
            ("cancel_url", format!("{}/", origin)),
            (
                "metadata[prompt]",
                truncate_chars(prompt, METADATA_PROMPT_CHARS),
            ),
        ];

        let response = self
            .http
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .bearer_auth(self.secret_key.expose_secret())
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api(format!(
                "checkout session creation returned {}: {}",
                status, body
            )));
        }

        let session: CheckoutSession = response
            .json()
            .await
            .map_err(|e| PaymentError::Api(e.to_string()))?;
        debug!(session_id = %session.id, "created checkout session");
        Ok(session)
    }
}

/// Truncate to `max` characters, appending an ellipsis marker when text was cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> CheckoutClient {
        let config = CheckoutConfig {
            api_base: server.url(),
            ..Default::default()
        };
        CheckoutClient::new(config, SecretString::from("sk_test".to_string()))
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate_chars("short prompt", 500), "short prompt");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        let long = "x".repeat(600);
        let cut = truncate_chars(&long, 500);
        assert_eq!(cut.chars().count(), 503);
        assert!(cut.ends_with("..."));
    }

    #[tokio::test]
    async fn test_create_session_returns_provider_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/checkout/sessions")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("mode".into(), "payment".into()),
                Matcher::UrlEncoded(
                    "line_items[0][price_data][unit_amount]".into(),
                    "999".into(),
                ),
                Matcher::UrlEncoded(
                    "success_url".into(),
                    "https://promptiq.example/results?session_id={CHECKOUT_SESSION_ID}".into(),
                ),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "cs_test_a1b2c3"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let session = client
            .create_session("Explain the water cycle, step by step.", Some("https://promptiq.example"))
            .await
            .unwrap();
        assert_eq!(session.id, "cs_test_a1b2c3");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_long_prompt_metadata_is_truncated() {
        let long_prompt = "p".repeat(600);
        let expected_metadata = format!("{}...", "p".repeat(500));

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/checkout/sessions")
            .match_body(Matcher::UrlEncoded(
                "metadata[prompt]".into(),
                expected_metadata,
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "cs_test_trunc"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let session = client.create_session(&long_prompt, None).await.unwrap();
        assert_eq!(session.id, "cs_test_trunc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/checkout/sessions")
            .with_status(402)
            .with_body(r#"{"error": {"message": "Your card was declined."}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .create_session("Explain the water cycle, step by step.", None)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Api(message) if message.contains("402")));
    }
}
