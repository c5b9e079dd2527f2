use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request to judge whether a word is used correctly in a sentence
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct WordUsageRequest {
    #[schemars(description = "Vocabulary word under evaluation")]
    pub word: String,
    #[schemars(description = "Sentence written by the learner")]
    pub sentence: String,
}

/// Request to judge whether a sentence uses a given verb tense correctly
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct TenseRequest {
    #[schemars(description = "Target verb tense, e.g. \"present perfect\"")]
    pub verb_tense: String,
    #[schemars(description = "Sentence written by the learner")]
    pub sentence: String,
}

/// Verdict returned by the word and tense evaluators.
///
/// The model is asked to answer with exactly this JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UsageEvaluation {
    pub correct: bool,
    pub explanation: String,
}
