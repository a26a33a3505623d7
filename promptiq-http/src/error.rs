//! Error handling for promptiq-http
//!
//! Maps domain failures onto HTTP responses. Pipeline outcomes the client
//! renders inline (invalid prompt, duplicate, unparseable evaluator reply)
//! never reach this type; handlers return them as 200-status bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use promptiq_core::payment::PaymentError;
use promptiq_core::provider::ProviderError;
use serde_json::json;
use std::cmp::PartialEq;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Client error with an explicit message
    BadRequest(String),

    /// Webhook signature rejection
    Signature(PaymentError),

    /// Payment provider failure during checkout
    Payment(PaymentError),

    /// Completion provider failure during evaluation
    Provider(ProviderError),

    /// Internal error
    Internal(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        Self::Provider(err)
    }
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        let (error_status, _) = self.status_and_body();
        &error_status == status_code
    }
}

impl AppError {
    /// Get the status code and response body for this error
    fn status_and_body(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            Self::Signature(err) => (StatusCode::BAD_REQUEST, json!({ "error": err.to_string() })),
            Self::Payment(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to create checkout session" }),
            ),
            Self::Provider(ProviderError::Timeout(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "ServerError",
                    "message": "The evaluation timed out. Please try again.",
                }),
            ),
            Self::Provider(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "ServerError",
                    "message": "An error occurred while evaluating the prompt.",
                }),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}
