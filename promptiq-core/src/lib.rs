//! # PromptIQ Core
//!
//! Domain logic for the PromptIQ prompt evaluation service.
//!
//! ## Components
//!
//! ### Evaluation Pipeline
//! Validates a submitted prompt against shallow-quality rules, guards against
//! near-term duplicate resubmission, delegates to a language-model backend,
//! and normalizes the structured critique it returns ([`evaluation`]).
//!
//! ### LLM Providers
//! The [`provider`] module defines the backend seam ([`provider::ProviderLLM`])
//! together with an OpenAI chat implementation and a deterministic scripted
//! provider used in tests.
//!
//! ### Usage Gate
//! Per-client free-evaluation accounting, held in a volatile in-memory table
//! for the life of the process ([`usage`]).
//!
//! ### Payment
//! Hosted checkout session creation and webhook signature verification
//! ([`payment`]).
//!
//! Configuration and secrets live in [`config`].

use thiserror::Error;

pub mod config;
pub mod evaluation;
pub mod payment;
pub mod provider;
pub mod usage;

/// Crate-internal error
#[derive(Debug, Error)]
pub enum Error {
    #[error("internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;
