use axum::{extract::State, http::HeaderMap, response::Json};
use chrono::Utc;
use tracing::{error, info};

use promptiq_core::payment::{PaymentError, WebhookEvent, webhook::SIGNATURE_HEADER};

use crate::error::AppError;
use crate::models::WebhookAck;
use crate::server::AppState;

/// Receive payment provider webhooks
///
/// Verifies the provider signature over the raw body, then dispatches on the
/// event type for logging. No state mutation happens on this path; retries
/// are the provider's responsibility.
#[utoipa::path(
    post,
    path = "/webhooks/payment",
    responses(
        (status = 200, description = "Event received", body = WebhookAck),
        (status = 400, description = "Missing or invalid signature")
    )
)]
#[axum::debug_handler]
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookAck>, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Signature(PaymentError::MissingSignature))?;

    let event = state
        .webhook
        .verify(&body, signature, Utc::now())
        .map_err(|err| {
            error!("Webhook signature verification failed: {}", err);
            AppError::Signature(err)
        })?;

    match &event {
        WebhookEvent::CheckoutSessionCompleted { session_id } => {
            info!(%session_id, "Payment successful for session");
        }
        WebhookEvent::PaymentSucceeded { payment_intent_id } => {
            info!(%payment_intent_id, "Payment succeeded");
        }
        WebhookEvent::PaymentFailed { payment_intent_id } => {
            info!(%payment_intent_id, "Payment failed");
        }
        WebhookEvent::Other { kind } => {
            info!(%kind, "Unhandled event type");
        }
    }

    Ok(Json(WebhookAck { received: true }))
}
