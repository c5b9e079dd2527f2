//! Summary evaluation with a fixed line-oriented answer format.
//!
//! The model must answer with two lines:
//!
//! ```text
//! Grammar & Spelling: <score>, Feedback: <text>
//! Coherence: <score>, Feedback: <text>
//! ```
//!
//! Unlike the JSON-mode evaluators, an answer that does not follow this
//! format fails the request.

use async_trait::async_trait;
use lambda_runtime::tracing::{error, info};
use serde_json::Value;

use super::Capability;
use super::validation::Fields;
use crate::context::AppContext;
use crate::models::error::{ProcessingError, ValidationError};
use crate::models::openai::ChatMessage;
use crate::models::summary::{CategoryScore, SummaryEvaluation, SummaryRequest};

const TEMPERATURE: f32 = 0.3;
const MAX_SCORE: u8 = 100;

const GRAMMAR_LABEL: &str = "Grammar & Spelling:";
const COHERENCE_LABEL: &str = "Coherence:";
const FEEDBACK_LABEL: &str = "Feedback:";

const SYSTEM_PROMPT: &str = "You are an English writing evaluator. Provide detailed, \
    constructive feedback in exactly the format requested.";

/// Grades a learner's summary of an article.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryEvaluator;

impl SummaryEvaluator {
    fn prompt(request: &SummaryRequest) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Evaluate the following summary of an article based on two categories: \
                 grammar & spelling, and coherence.\n\n\
                 Original Article:\n{}\n\n\
                 User's Summary:\n{}\n\n\
                 Score each category from 0 to 100 and respond with exactly two lines \
                 in this format:\n\
                 {GRAMMAR_LABEL} <score>, {FEEDBACK_LABEL} <feedback>\n\
                 {COHERENCE_LABEL} <score>, {FEEDBACK_LABEL} <feedback>",
                request.article, request.summary
            )),
        ]
    }
}

/// Extracts both category scores from the model's answer.
///
/// # Errors
///
/// Returns [`ProcessingError::Parse`] if either labelled line is missing or
/// malformed.
pub fn parse_evaluation(answer: &str) -> Result<SummaryEvaluation, ProcessingError> {
    Ok(SummaryEvaluation {
        grammar_spelling: parse_category(answer, GRAMMAR_LABEL)?,
        coherence: parse_category(answer, COHERENCE_LABEL)?,
    })
}

// First line carrying `label` that fully parses wins. If lines carry the label
// but none parses, the first line's error is reported.
fn parse_category(answer: &str, label: &str) -> Result<CategoryScore, ProcessingError> {
    let mut first_error = None;

    for rest in answer
        .lines()
        .filter_map(|line| line.split_once(label).map(|(_, rest)| rest))
    {
        match parse_scored_line(rest, label) {
            Ok(category) => return Ok(category),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    Err(first_error
        .unwrap_or_else(|| ProcessingError::Parse(format!("label '{label}' not found"))))
}

// Reads `<score>, Feedback: <text>` from what follows the label
fn parse_scored_line(rest: &str, label: &str) -> Result<CategoryScore, ProcessingError> {
    let (score, feedback) = rest
        .split_once(',')
        .ok_or_else(|| ProcessingError::Parse(format!("'{label}' line has no feedback")))?;

    let score = strip_emphasis(score);
    let score: u8 = score
        .parse()
        .ok()
        .filter(|score| *score <= MAX_SCORE)
        .ok_or_else(|| {
            ProcessingError::Parse(format!("'{label}' score {score:?} is not in 0-100"))
        })?;

    let feedback = strip_emphasis(feedback)
        .strip_prefix(FEEDBACK_LABEL)
        .map(strip_emphasis)
        .filter(|feedback| !feedback.is_empty())
        .ok_or_else(|| ProcessingError::Parse(format!("'{label}' line has no feedback")))?;

    Ok(CategoryScore {
        score,
        feedback: feedback.to_string(),
    })
}

// Trims whitespace and Markdown bold/italic markers from both ends
fn strip_emphasis(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
}

#[async_trait]
impl Capability for SummaryEvaluator {
    type Request = SummaryRequest;
    type Response = SummaryEvaluation;

    const NAME: &'static str = "summary_evaluator";
    const ALLOWED_METHODS: &'static str = "POST,OPTIONS";

    fn validate(&self, body: &Value) -> Result<SummaryRequest, ValidationError> {
        let fields = Fields::from_body(body)?;
        let article = fields.required_str("article")?;
        let summary = fields.required_str("summary")?;
        fields.deny_unknown(&["article", "summary"])?;
        Ok(SummaryRequest { article, summary })
    }

    async fn process(
        &self,
        ctx: &AppContext,
        request: SummaryRequest,
    ) -> Result<SummaryEvaluation, ProcessingError> {
        info!(
            article_chars = request.article.len(),
            summary_chars = request.summary.len(),
            "Evaluating summary"
        );
        let answer = ctx
            .complete(Self::prompt(&request), TEMPERATURE, None)
            .await?;

        parse_evaluation(&answer).inspect_err(|e| {
            error!(error = %e, answer = %answer, "Model answer did not follow the score format");
        })
    }
}
