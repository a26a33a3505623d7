use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::ProviderResult;
use crate::config::EvaluationConfig;

/// A single completion returned by a language-model backend.
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    pub model: String,
    pub created_at: DateTime<Utc>,
    /// (prompt tokens, completion tokens) when the backend reports usage
    pub token_usage: Option<(usize, usize)>,
    pub finish_reason: Option<String>,
}

/// Backend seam for the evaluation pipeline: one system-instruction plus
/// user-content pair in, one raw completion out. No streaming, no multi-turn.
#[async_trait]
pub trait ProviderLLM: Send + Sync {
    async fn send_message(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &EvaluationConfig,
    ) -> ProviderResult<LLMResponse>;

    fn name(&self) -> &str;
}
