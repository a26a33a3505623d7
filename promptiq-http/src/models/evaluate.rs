use chrono::{DateTime, Utc};
use promptiq_core::evaluation::{EvaluationError, EvaluationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Requests
#[derive(Debug, Clone, Serialize, Deserialize, Default, ToSchema)]
pub struct EvaluateRequest {
    /// Prompt text to evaluate
    pub prompt: String,

    /// Fingerprint echoed from the caller's previous evaluation
    #[serde(default)]
    pub last_hash: Option<String>,

    /// Timestamp of the caller's previous evaluation
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub last_ts: Option<DateTime<Utc>>,

    /// Opaque caller metadata forwarded to the evaluator
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub meta: Option<Value>,

    /// Caller-supplied submission timestamp forwarded to the evaluator
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Checkout session reference for evaluations after payment
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Evaluate response: either a normalized result or a structured error body.
/// Both are delivered with HTTP 200 so the client can render inline feedback
/// instead of a generic failure page.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EvaluateResponse {
    Error(ErrorBody),
    Result(EvaluationResult),
}

/// Wire taxonomy for structured failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ErrorKind {
    InvalidPrompt,
    DuplicatePrompt,
    #[serde(rename = "InvalidAIResponse")]
    InvalidAiResponse,
    FreeLimitExceeded,
    ServerError,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorKind,

    pub message: String,

    /// Raw evaluator text, attached unmodified when decoding failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorBody {
    /// Structured 200-status body for pipeline failures the client renders
    /// inline. Provider failures return `None` and surface as ServerError.
    pub fn from_evaluation(err: &EvaluationError) -> Option<Self> {
        match err {
            EvaluationError::InvalidPrompt { message } => Some(Self {
                error: ErrorKind::InvalidPrompt,
                message: message.clone(),
                raw: None,
            }),
            EvaluationError::DuplicatePrompt => Some(Self {
                error: ErrorKind::DuplicatePrompt,
                message: err.to_string(),
                raw: None,
            }),
            EvaluationError::InvalidAiResponse { raw } => Some(Self {
                error: ErrorKind::InvalidAiResponse,
                message: err.to_string(),
                raw: Some(raw.clone()),
            }),
            EvaluationError::Provider(_) => None,
        }
    }

    pub fn free_limit_exceeded() -> Self {
        Self {
            error: ErrorKind::FreeLimitExceeded,
            message: "The free evaluation for this address has been used. \
                      Complete checkout to evaluate again."
                .to_string(),
            raw: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::InvalidAiResponse).unwrap(),
            r#""InvalidAIResponse""#
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::FreeLimitExceeded).unwrap(),
            r#""FreeLimitExceeded""#
        );
    }

    #[test]
    fn test_error_body_omits_absent_raw() {
        let body = ErrorBody::free_limit_exceeded();
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn test_invalid_ai_response_keeps_raw_text() {
        let err = EvaluationError::InvalidAiResponse {
            raw: "not json".to_string(),
        };
        let body = ErrorBody::from_evaluation(&err).unwrap();
        assert_eq!(body.error, ErrorKind::InvalidAiResponse);
        assert_eq!(body.raw.as_deref(), Some("not json"));
    }
}
