use async_trait::async_trait;
use lambda_runtime::tracing::info;
use serde_json::Value;

use super::validation::Fields;
use super::verdict::{TEMPERATURE, parse_verdict};
use super::Capability;
use crate::context::AppContext;
use crate::models::error::{ProcessingError, ValidationError};
use crate::models::evaluation::{TenseRequest, UsageEvaluation};
use crate::models::openai::ChatMessage;

const SYSTEM_PROMPT: &str = "You are a tense evaluator. Respond only with valid JSON.";

/// Judges whether a learner's sentence uses the requested verb tense.
#[derive(Debug, Clone, Copy, Default)]
pub struct TenseEvaluator;

impl TenseEvaluator {
    fn prompt(request: &TenseRequest) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Evaluate whether the following sentence correctly uses the '{}' tense: \"{}\". \
                 Return a JSON with two fields: 'correct' (a boolean) and \
                 'explanation' (a string explaining your decision).",
                request.verb_tense, request.sentence
            )),
        ]
    }
}

#[async_trait]
impl Capability for TenseEvaluator {
    type Request = TenseRequest;
    type Response = UsageEvaluation;

    const NAME: &'static str = "tense_evaluator";
    const ALLOWED_METHODS: &'static str = "POST,OPTIONS";

    fn validate(&self, body: &Value) -> Result<TenseRequest, ValidationError> {
        let fields = Fields::from_body(body)?;
        let verb_tense = fields.required_str("verb_tense")?;
        let sentence = fields.required_str("sentence")?;
        fields.deny_unknown(&["verb_tense", "sentence"])?;
        Ok(TenseRequest {
            verb_tense,
            sentence,
        })
    }

    async fn process(
        &self,
        ctx: &AppContext,
        request: TenseRequest,
    ) -> Result<UsageEvaluation, ProcessingError> {
        info!(verb_tense = %request.verb_tense, "Evaluating verb tense");
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
    fn test_validate() {
        let request = TenseEvaluator
            .validate(&json!({"verb_tense": "past simple", "sentence": "I walked home."}))
            .unwrap();
        assert_eq!(request.verb_tense, "past simple");
    }

    #[test]
    fn test_validate_rejects_blank_tense() {
        let err = TenseEvaluator
            .validate(&json!({"verb_tense": "   ", "sentence": "I walked home."}))
            .unwrap_err();
        assert_eq!(err.message(), "'verb_tense' cannot be empty");
    }

    #[test]
    fn test_validate_rejects_unknown_field() {
        let err = TenseEvaluator
            .validate(&json!({"verb_tense": "past simple", "sentence": "I walked.", "word": "x"}))
            .unwrap_err();
        assert_eq!(err.message(), "unknown field 'word'");
    }

    #[test]
    fn test_prompt_mentions_tense() {
        let messages = TenseEvaluator::prompt(&TenseRequest {
            verb_tense: "present perfect".into(),
            sentence: "I have eaten.".into(),
        });
        assert!(messages[1].content.contains("'present perfect' tense"));
    }
}
