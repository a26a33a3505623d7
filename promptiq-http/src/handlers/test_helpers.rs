use std::sync::Arc;

use promptiq_core::config::SecretConfig;
use promptiq_core::provider::{ProviderLLM, ScriptedProviderLLM};

use crate::server::{AppState, ServerConfig};

/// A well-formed evaluator reply, without a hash so the locally computed
/// fingerprint gets injected.
pub const SCRIPTED_EVALUATION_JSON: &str = r####"{
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

/// Create a test AppState whose LLM backend replies from a script
pub fn create_test_state() -> AppState {
    let llm =
        ScriptedProviderLLM::new("scripted").with_answer("prompt_to_evaluate:", SCRIPTED_EVALUATION_JSON);
    create_test_state_with_llm(Arc::new(llm))
}

/// Create a test AppState around a caller-supplied LLM backend
pub fn create_test_state_with_llm(llm: Arc<dyn ProviderLLM>) -> AppState {
    AppState::with_llm(&ServerConfig::default(), &SecretConfig::default(), llm)
}
