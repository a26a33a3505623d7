use axum::{extract::State, http::HeaderMap, response::Json};
use tracing::error;

use crate::error::AppError;
use crate::models::{CheckoutRequest, CheckoutResponse};
use crate::server::AppState;

/// Create a hosted checkout session for one evaluation
///
/// Only a truncated excerpt of the prompt is attached to the session as
/// metadata; evaluation itself always receives the full original text.
#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 400, description = "Prompt is required"),
        (status = 500, description = "Failed to create checkout session")
    )
)]
#[axum::debug_handler]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, AppError> {
    if payload.prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt is required".to_string()));
    }

    let origin = headers.get("origin").and_then(|value| value.to_str().ok());
    let session = state
        .checkout
        .create_session(&payload.prompt, origin)
        .await
        .map_err(|err| {
            error!("Error creating checkout session: {}", err);
            AppError::Payment(err)
        })?;

    Ok(Json(CheckoutResponse {
        session_id: session.id,
    }))
}
