use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::provider::ProviderError;

/// How strongly a submitted prompt exhibits one of the reference
/// prompt-engineering patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkFit {
    Match,
    Partial,
    Miss,
}

/// Per-criterion structural scores, each 0-5.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StructuralScores {
    pub clarity: u8,
    pub role: u8,
    pub context: u8,
    pub constraints: u8,
    pub error_handling: u8,
}

/// Normalized evaluator output returned to the caller. Produced once per
/// request, never stored server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EvaluationResult {
    /// Framework name -> fit label for the reference pattern taxonomy
    pub framework_mapping: HashMap<String, FrameworkFit>,

    pub structural_scoring: StructuralScores,

    /// Average of the structural scores scaled by 4, max 20
    pub overall_score: u8,

    pub detailed_feedback: String,

    /// Suggested fixes, ranked by impact
    pub improvements: Vec<String>,

    pub improved_prompt: String,

    /// Content fingerprint; injected locally when the evaluator omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// Terminal pipeline failures. Every invocation ends in exactly one of these
/// or a successful [`EvaluationResult`]; no stage retries.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The submission failed the shallow-quality check
    #[error("{message}")]
    InvalidPrompt { message: String },

    /// The same fingerprint was resubmitted inside the duplicate window
    #[error(
        "This prompt was already evaluated recently. Please refine it before requesting another evaluation."
    )]
    DuplicatePrompt,

    /// The evaluator reply could not be decoded into an [`EvaluationResult`]
    #[error("The evaluator did not return valid JSON. See raw response.")]
    InvalidAiResponse { raw: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
