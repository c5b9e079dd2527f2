//! Parsing for JSON-mode evaluator answers.
//!
//! The word and tense evaluators instruct the model to reply with
//! `{"correct": bool, "explanation": string}`. Anything else degrades to a
//! negative verdict instead of failing the request.

use lambda_runtime::tracing::warn;

use crate::models::evaluation::UsageEvaluation;

/// Temperature shared by the JSON-mode evaluators.
pub const TEMPERATURE: f32 = 0.7;

/// Interprets model output as a [`UsageEvaluation`], never failing.
#[must_use]
pub fn parse_verdict(answer: &str) -> UsageEvaluation {
    serde_json::from_str::<UsageEvaluation>(answer.trim()).unwrap_or_else(|e| {
        warn!(error = %e, answer = %answer, "Failed to parse model response as JSON verdict");
        UsageEvaluation {
            correct: false,
            explanation: format!("Invalid response format from language model: {e}"),
        }
    })
}
