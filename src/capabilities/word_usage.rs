use async_trait::async_trait;
use lambda_runtime::tracing::info;
use serde_json::Value;

use super::validation::Fields;
use super::verdict::{TEMPERATURE, parse_verdict};
use super::Capability;
use crate::context::AppContext;
use crate::models::error::{ProcessingError, ValidationError};
use crate::models::evaluation::{UsageEvaluation, WordUsageRequest};
use crate::models::openai::ChatMessage;

const SYSTEM_PROMPT: &str = "You are a grammar and usage evaluator. Respond only with valid JSON.";

/// Judges whether a vocabulary word is used correctly in a learner's sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordUsageEvaluator;

impl WordUsageEvaluator {
    fn prompt(request: &WordUsageRequest) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Evaluate the usage of the word '{}' in the following sentence: \"{}\". \
                 Return a JSON with two fields: 'correct' (a boolean) and \
                 'explanation' (a string explaining your decision).",
                request.word, request.sentence
            )),
        ]
    }
}

#[async_trait]
impl Capability for WordUsageEvaluator {
    type Request = WordUsageRequest;
    type Response = UsageEvaluation;

    const NAME: &'static str = "word_usage_evaluator";
    const ALLOWED_METHODS: &'static str = "POST,OPTIONS";

    fn validate(&self, body: &Value) -> Result<WordUsageRequest, ValidationError> {
        let fields = Fields::from_body(body)?;
        let word = fields.required_str("word")?;
        let sentence = fields.required_str("sentence")?;
        fields.deny_unknown(&["word", "sentence"])?;
        Ok(WordUsageRequest { word, sentence })
    }

    async fn process(
        &self,
        ctx: &AppContext,
        request: WordUsageRequest,
    ) -> Result<UsageEvaluation, ProcessingError> {
        info!(word = %request.word, "Evaluating word usage");
        let answer = ctx
            .complete(Self::prompt(&request), TEMPERATURE, None)
            .await?;
        Ok(parse_verdict(&answer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_trims_fields() {
        let request = WordUsageEvaluator
            .validate(&json!({"word": " ubiquitous ", "sentence": " Phones are ubiquitous. "}))
            .unwrap();
        assert_eq!(request.word, "ubiquitous");
        assert_eq!(request.sentence, "Phones are ubiquitous.");
    }

    #[test]
    fn test_validate_names_first_missing_field() {
        let err = WordUsageEvaluator.validate(&json!({})).unwrap_err();
        assert_eq!(err.message(), "'word' must be a string");

        let err = WordUsageEvaluator
            .validate(&json!({"word": "ubiquitous", "sentence": ""}))
            .unwrap_err();
        assert_eq!(err.message(), "'sentence' cannot be empty");
    }

    #[test]
    fn test_prompt_mentions_word_and_sentence() {
        let messages = WordUsageEvaluator::prompt(&WordUsageRequest {
            word: "ubiquitous".into(),
            sentence: "Phones are ubiquitous.".into(),
        });
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("'ubiquitous'"));
        assert!(messages[1].content.contains("\"Phones are ubiquitous.\""));
    }
}
