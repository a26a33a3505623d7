use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Requests
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct CheckoutRequest {
    /// Prompt the evaluation will be purchased for
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// Provider-issued checkout session id
    pub session_id: String,
}
