use axum::{extract::State, http::HeaderMap, response::Json};

use crate::models::{RecordUsageResponse, UsageResponse};
use crate::server::AppState;

use super::client_key::resolve_client_key;

/// Check free-usage status for the calling address
#[utoipa::path(
    get,
    path = "/usage",
    responses(
        (status = 200, description = "Usage status retrieved successfully", body = UsageResponse)
    )
)]
#[axum::debug_handler]
pub async fn check_usage(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<UsageResponse> {
    let client_key = resolve_client_key(&headers);
    Json(UsageResponse::from(state.usage_gate.check(&client_key)))
}

/// Record one free-usage consumption for the calling address
#[utoipa::path(
    post,
    path = "/usage",
    responses(
        (status = 200, description = "Usage recorded successfully", body = RecordUsageResponse)
    )
)]
#[axum::debug_handler]
pub async fn record_usage(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<RecordUsageResponse> {
    let client_key = resolve_client_key(&headers);
    let usage_count = state.usage_gate.record(&client_key);
    Json(RecordUsageResponse {
        success: true,
        usage_count,
    })
}
