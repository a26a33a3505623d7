use promptiq_core::usage::UsageStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Free-usage status for the calling address
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    /// True while no free evaluation has been consumed
    pub can_use_free: bool,

    pub usage_count: u64,

    /// RFC 3339 timestamp of the last consumption, empty when never used
    pub last_used: String,
}

impl From<UsageStatus> for UsageResponse {
    fn from(status: UsageStatus) -> Self {
        Self {
            can_use_free: status.can_use_free,
            usage_count: status.usage_count,
            last_used: status
                .last_used
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

/// Acknowledgement of one recorded consumption
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsageResponse {
    pub success: bool,

    pub usage_count: u64,
}
