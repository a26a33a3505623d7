use axum::{extract::State, http::HeaderMap, response::Json};
use tracing::{error, info};

use promptiq_core::evaluation::{EvaluationError, PromptSubmission};

use crate::error::AppError;
use crate::models::{ErrorBody, EvaluateRequest, EvaluateResponse};
use crate::server::AppState;

use super::client_key::resolve_client_key;

/// Evaluate a submitted prompt
///
/// Consults the usage gate for the calling address, then runs the validation
/// and delegation pipeline. Pipeline failures the client renders inline come
/// back as 200-status structured bodies.
#[utoipa::path(
    post,
    path = "/evaluate",
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Evaluation result or structured pipeline error", body = EvaluateResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
pub async fn evaluate_prompt(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let client_key = resolve_client_key(&headers);
    let free_tier = payload.session_id.is_none();

    if free_tier && !state.usage_gate.check(&client_key).can_use_free {
        return Ok(Json(EvaluateResponse::Error(
            ErrorBody::free_limit_exceeded(),
        )));
    }
    if let Some(session_id) = &payload.session_id {
        // pass-through reference from /checkout, logged but not verified
        info!(%session_id, "evaluating a paid submission");
    }

    let submission = PromptSubmission {
        text: payload.prompt,
        meta: payload.meta,
        client_timestamp: payload.timestamp,
        last_hash: payload.last_hash,
        last_seen: payload.last_ts,
    };

    match state.pipeline.evaluate(&submission).await {
        Ok(result) => {
            if free_tier {
                state.usage_gate.record(&client_key);
            }
            Ok(Json(EvaluateResponse::Result(result)))
        }
        Err(err) => match ErrorBody::from_evaluation(&err) {
            Some(body) => Ok(Json(EvaluateResponse::Error(body))),
            None => {
                error!("Error evaluating prompt: {}", err);
                match err {
                    EvaluationError::Provider(provider_err) => {
                        Err(AppError::Provider(provider_err))
                    }
                    other => Err(AppError::Internal(other.to_string())),
                }
            }
        },
    }
}
