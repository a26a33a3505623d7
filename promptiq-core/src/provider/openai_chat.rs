use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use tracing::debug;

use super::{
    llm::{LLMResponse, ProviderLLM, ResponseMetadata},
    types::{ProviderError, ProviderResult},
};
use crate::config::{EvaluationConfig, ProviderSecretConfig};

pub struct OpenAIChatProviderLLM {
    client: Client<OpenAIConfig>,
    name: String,
}

impl OpenAIChatProviderLLM {
    pub fn new(name: impl Into<String>, secret: &ProviderSecretConfig) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(secret.api_key.expose_secret());
        Self {
            client: Client::with_config(openai_config),
            name: name.into(),
        }
    }

    #[tracing::instrument(skip(self, system_prompt, user_content, config))]
    async fn chat_completion(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &EvaluationConfig,
    ) -> ProviderResult<LLMResponse> {
        debug!("user content: {}", user_content);

        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(system_prompt.to_string()),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(user_content.to_string()),
                name: None,
            }),
        ];

        let request = CreateChatCompletionRequest {
            model: config.model.clone(),
            messages,
            temperature: Some(config.temperature),
            max_completion_tokens: Some(config.max_tokens as u32),
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ProviderError::ApiError(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| ProviderError::ApiError("No response content".into()))?;

        Ok(LLMResponse {
            content,
            metadata: ResponseMetadata {
                model: config.model.clone(),
                created_at: Utc::now(),
                token_usage: response
                    .usage
                    .map(|u| (u.prompt_tokens as usize, u.completion_tokens as usize)),
                finish_reason: response
                    .choices
                    .first()
                    .map(|c| format!("{:?}", c.finish_reason)),
            },
        })
    }
}

#[async_trait]
impl ProviderLLM for OpenAIChatProviderLLM {
    async fn send_message(
        &self,
        system_prompt: &str,
        user_content: &str,
        config: &EvaluationConfig,
    ) -> ProviderResult<LLMResponse> {
        self.chat_completion(system_prompt, user_content, config).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
