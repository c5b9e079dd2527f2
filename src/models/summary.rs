use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct SummaryRequest {
    #[schemars(description = "Original article text")]
    pub article: String,
    #[schemars(description = "Learner's summary of the article")]
    pub summary: String,
}

/// Score and feedback for one evaluation category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CategoryScore {
    #[schemars(range(min = 0, max = 100))]
    pub score: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryEvaluation {
    pub grammar_spelling: CategoryScore,
    pub coherence: CategoryScore,
}
