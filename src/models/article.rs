use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Article generation takes no input; any body is accepted and ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct ArticleRequest {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleResponse {
    #[schemars(description = "Topic the article was written about")]
    pub topic: String,
    #[schemars(description = "Markdown-formatted article text")]
    pub article: String,
}
