use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned to the payment provider after a verified event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}
