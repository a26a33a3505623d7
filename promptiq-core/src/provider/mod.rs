pub mod llm;
pub mod openai_chat;
pub mod scripted;
pub mod types;

pub use llm::{LLMResponse, ProviderLLM, ResponseMetadata};
pub use openai_chat::OpenAIChatProviderLLM;
pub use scripted::ScriptedProviderLLM;
pub use types::{ProviderError, ProviderResult};
