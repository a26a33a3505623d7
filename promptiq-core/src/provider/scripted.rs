use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use super::{
    llm::{LLMResponse, ProviderLLM, ResponseMetadata},
    types::{ProviderError, ProviderResult},
};
use crate::config::EvaluationConfig;

type Pattern = String;

type Answer = String;

/// Deterministic backend answering from a fixed pattern -> answer script.
/// Replies with the first answer whose pattern occurs in the user content;
/// errors when nothing matches. Used in tests and offline runs.
pub struct ScriptedProviderLLM {
    name: String,
    script: DashMap<Pattern, Answer>,
}

impl ScriptedProviderLLM {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            script: DashMap::new(),
        }
    }

    pub fn with_answer(self, pattern: impl Into<String>, answer: impl Into<String>) -> Self {
        self.script.insert(pattern.into(), answer.into());
        self
    }
}

#[async_trait]
impl ProviderLLM for ScriptedProviderLLM {
    #[tracing::instrument(skip(self, _system_prompt, user_content, config), level = "debug")]
    async fn send_message(
        &self,
        _system_prompt: &str,
        user_content: &str,
        config: &EvaluationConfig,
    ) -> ProviderResult<LLMResponse> {
        let answer = self
            .script
            .iter()
            .find(|entry| user_content.contains(entry.key()))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| ProviderError::ApiError("No scripted response found".to_string()))?;
        debug!("response: {}", answer);

        Ok(LLMResponse {
            content: answer,
            metadata: ResponseMetadata {
                model: config.model.clone(),
                created_at: Utc::now(),
                token_usage: None,
                finish_reason: None,
            },
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_answers_first_match() {
        let provider = ScriptedProviderLLM::new("scripted")
            .with_answer("water cycle", r#"{"answer": 1}"#);
        let config = EvaluationConfig::default();

        let response = provider
            .send_message("system", "prompt_to_evaluate: explain the water cycle", &config)
            .await
            .unwrap();
        assert_eq!(response.content, r#"{"answer": 1}"#);
        assert_eq!(response.metadata.model, config.model);
    }

    #[tokio::test]
    async fn test_scripted_errors_without_match() {
        let provider = ScriptedProviderLLM::new("scripted");
        let config = EvaluationConfig::default();

        let result = provider.send_message("system", "anything", &config).await;
        assert!(matches!(result, Err(ProviderError::ApiError(_))));
    }
}
