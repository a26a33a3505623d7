use chrono::{DateTime, Utc};
use std::time::Duration;

use super::result::EvaluationError;

/// Substrings that mark a submission as instruction-style.
/// Matched case-insensitively anywhere in the text.
pub const INSTRUCTION_SIGNALS: [&str; 9] = [
    "you are",
    "respond",
    "return",
    "step",
    "task",
    "format",
    "explain",
    "analyze",
    "summarize",
];

pub const MIN_PROMPT_CHARS: usize = 40;
pub const MIN_PROMPT_WORDS: usize = 6;

/// Shallow-quality check over the trimmed prompt text. Rules run in fixed
/// order; the first failing rule wins and carries its own user-facing message.
pub fn validate_prompt(trimmed: &str) -> Result<(), EvaluationError> {
    if trimmed.is_empty() {
        return Err(invalid(
            "Prompt is empty. Please enter a prompt for evaluation.",
        ));
    }
    if trimmed.chars().count() < MIN_PROMPT_CHARS {
        return Err(invalid(
            "Prompt is too short. Please enter at least 40 characters.",
        ));
    }
    if trimmed.split_whitespace().count() < MIN_PROMPT_WORDS {
        return Err(invalid("Prompt must contain at least 6 words."));
    }
    let lowered = trimmed.to_lowercase();
    if !INSTRUCTION_SIGNALS
        .iter()
        .any(|signal| lowered.contains(signal))
    {
        return Err(invalid(
            "Prompt must include an instruction phrase such as 'you are', 'respond', \
             'return', 'step', 'task', 'format', 'explain', 'analyze', or 'summarize'.",
        ));
    }
    Ok(())
}

fn invalid(message: &str) -> EvaluationError {
    EvaluationError::InvalidPrompt {
        message: message.to_string(),
    }
}

/// Client-cooperative duplicate guard: true when the caller echoed back a
/// fingerprint matching the current one and its timestamp falls inside the
/// window. Skipped entirely when either field is absent; the server keeps no
/// history of its own for this check.
pub fn is_recent_duplicate(
    fingerprint: &str,
    last_hash: Option<&str>,
    last_seen: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    match (last_hash, last_seen) {
        (Some(hash), Some(seen)) => {
            let elapsed = now.signed_duration_since(seen);
            hash == fingerprint && elapsed.num_milliseconds() < window.as_millis() as i64
        }
        _ => false,
    }
}
