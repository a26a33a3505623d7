use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use super::{
    fingerprint::content_fingerprint,
    persona,
    result::{EvaluationError, EvaluationResult},
    validate,
};
use crate::config::EvaluationConfig;
use crate::provider::{ProviderError, ProviderLLM};

/// One prompt submission. Request-scoped; nothing here outlives the call.
#[derive(Debug, Clone, Default)]
pub struct PromptSubmission {
    pub text: String,

    /// Opaque caller metadata forwarded to the evaluator
    pub meta: Option<Value>,

    /// Caller-supplied submission timestamp forwarded to the evaluator
    pub client_timestamp: Option<DateTime<Utc>>,

    /// Fingerprint echoed from the caller's previous evaluation
    pub last_hash: Option<String>,

    /// Timestamp of the caller's previous evaluation
    pub last_seen: Option<DateTime<Utc>>,
}

/// Stateless per-call pipeline: validate, guard against duplicates, delegate
/// to the LLM backend, decode. No stage retries; the first failure is final.
pub struct EvaluationPipeline {
    llm: Arc<dyn ProviderLLM>,
    config: EvaluationConfig,
}

impl EvaluationPipeline {
    pub fn new(llm: Arc<dyn ProviderLLM>, config: EvaluationConfig) -> Self {
        Self { llm, config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    #[tracing::instrument(skip(self, submission))]
    pub async fn evaluate(
        &self,
        submission: &PromptSubmission,
    ) -> Result<EvaluationResult, EvaluationError> {
        let trimmed = submission.text.trim();
        validate::validate_prompt(trimmed)?;

        let fingerprint = content_fingerprint(trimmed);
        if validate::is_recent_duplicate(
            &fingerprint,
            submission.last_hash.as_deref(),
            submission.last_seen,
            Utc::now(),
            self.config.duplicate_window,
        ) {
            return Err(EvaluationError::DuplicatePrompt);
        }

        let user_content = persona::user_content(
            trimmed,
            submission.meta.as_ref(),
            submission.client_timestamp.as_ref(),
        );
        let response = timeout(
            self.config.request_timeout,
            self.llm
                .send_message(persona::EVALUATOR_PERSONA, &user_content, &self.config),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.config.request_timeout))??;
        debug!("evaluator response: {}", response.content);

        let mut result: EvaluationResult = serde_json::from_str(&response.content)
            .map_err(|_| EvaluationError::InvalidAiResponse {
                raw: response.content.clone(),
            })?;
        if result.hash.is_none() {
            result.hash = Some(fingerprint);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ScriptedProviderLLM;

    const PASSING_PROMPT: &str =
        "Explain the water cycle in simple terms, step by step, and return a short summary.";

    const EVALUATION_JSON: &str = r####"{
        "framework_mapping": {
            "clarifying_interview": "miss",
            "step_by_step_chain": "match",
            "role_task_format": "partial"
        },
        "structural_scoring": {
            "clarity": 4,
            "role": 2,
            "context": 3,
            "constraints": 3,
            "error_handling": 1
        },
        "overall_score": 10,
        "detailed_feedback": "Clear task with an explicit sequencing cue.",
        "improvements": ["Name a role for the model.", "Pin down the output length."],
        "improved_prompt": "### ROLE\nYou are a science teacher.\n\n### TASK\n1. Explain the water cycle."
    }"####;

    fn pipeline_with(script_answer: &str) -> EvaluationPipeline {
        let llm = ScriptedProviderLLM::new("scripted")
            .with_answer("prompt_to_evaluate:", script_answer);
        EvaluationPipeline::new(Arc::new(llm), EvaluationConfig::default())
    }

    #[tokio::test]
    async fn test_success_injects_fingerprint() {
        let pipeline = pipeline_with(EVALUATION_JSON);
        let submission = PromptSubmission {
            text: PASSING_PROMPT.to_string(),
            ..Default::default()
        };

        let result = pipeline.evaluate(&submission).await.unwrap();
        assert_eq!(result.overall_score, 10);
        assert_eq!(result.hash, Some(content_fingerprint(PASSING_PROMPT)));
        assert_eq!(
            result.framework_mapping.get("step_by_step_chain"),
            Some(&crate::evaluation::FrameworkFit::Match)
        );
    }

    #[tokio::test]
    async fn test_evaluator_hash_is_kept_when_present() {
        let with_hash = EVALUATION_JSON.replacen(
            "\"overall_score\": 10,",
            "\"overall_score\": 10, \"hash\": \"feedfacefe\",",
            1,
        );
        let pipeline = pipeline_with(&with_hash);
        let submission = PromptSubmission {
            text: PASSING_PROMPT.to_string(),
            ..Default::default()
        };

        let result = pipeline.evaluate(&submission).await.unwrap();
        assert_eq!(result.hash, Some("feedfacefe".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_prompt_skips_backend() {
        // no scripted answer: reaching the backend would error, proving
        // validation rejected the submission first
        let pipeline =
            EvaluationPipeline::new(Arc::new(ScriptedProviderLLM::new("scripted")), EvaluationConfig::default());
        let submission = PromptSubmission {
            text: "too short".to_string(),
            ..Default::default()
        };

        let err = pipeline.evaluate(&submission).await.unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidPrompt { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_resubmission_rejected() {
        let pipeline = pipeline_with(EVALUATION_JSON);
        let submission = PromptSubmission {
            text: PASSING_PROMPT.to_string(),
            last_hash: Some(content_fingerprint(PASSING_PROMPT)),
            last_seen: Some(Utc::now() - chrono::Duration::minutes(10)),
            ..Default::default()
        };

        let err = pipeline.evaluate(&submission).await.unwrap_err();
        assert!(matches!(err, EvaluationError::DuplicatePrompt));
    }

    #[tokio::test]
    async fn test_stale_echo_is_not_a_duplicate() {
        let pipeline = pipeline_with(EVALUATION_JSON);
        let submission = PromptSubmission {
            text: PASSING_PROMPT.to_string(),
            last_hash: Some(content_fingerprint(PASSING_PROMPT)),
            last_seen: Some(Utc::now() - chrono::Duration::minutes(61)),
            ..Default::default()
        };

        assert!(pipeline.evaluate(&submission).await.is_ok());
    }

    #[tokio::test]
    async fn test_unparseable_reply_carries_raw_text() {
        let pipeline = pipeline_with("I am sorry, I cannot produce JSON today.");
        let submission = PromptSubmission {
            text: PASSING_PROMPT.to_string(),
            ..Default::default()
        };

        let err = pipeline.evaluate(&submission).await.unwrap_err();
        match err {
            EvaluationError::InvalidAiResponse { raw } => {
                assert_eq!(raw, "I am sorry, I cannot produce JSON today.");
            }
            other => panic!("expected InvalidAiResponse, got {:?}", other),
        }
    }
}
