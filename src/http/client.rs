use async_trait::async_trait;
use lambda_runtime::tracing::{debug, warn};
use reqwest::Client;
use std::fmt;

use crate::http::HTTP_CLIENT;
use crate::models::openai::{ApiErrorResponse, CompletionRequest, CompletionResponse};

/// Failure talking to the completion API.
#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced an HTTP response
    Transport(reqwest::Error),
    /// The API answered with a non-success status
    Api { status: u16, message: String },
    /// The response body was not a chat completion
    Decode(String),
    /// The completion had no choices or no text
    EmptyResponse,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "Request to completion API failed: {e}"),
            Self::Api { status, message } => {
                write!(f, "Completion API returned {status}: {message}")
            }
            Self::Decode(msg) => write!(f, "Failed to decode completion response: {msg}"),
            Self::EmptyResponse => write!(f, "Completion API returned no content"),
        }
    }
}

impl std::error::Error for CompletionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error)
    }
}

/// Trait for chat completion calls to enable testing with fakes.
///
/// Implementations make exactly one remote call per invocation. Retries,
/// if ever wanted, belong to the caller.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Runs one chat completion and returns the trimmed assistant text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API rejects it, or the
    /// response carries no text.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError>;
}

/// Production client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    client: Client,
    base_url: String,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client backed by the shared [`HTTP_CLIENT`].
    #[must_use]
    pub fn with_shared_client(base_url: impl Into<String>) -> Self {
        Self::new(HTTP_CLIENT.clone(), base_url)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            max_tokens = ?request.max_tokens,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.trim())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            warn!(status = status.as_u16(), message = %message, "Completion API rejected request");
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Decode(e.to_string()))?;

        extract_text(parsed)
    }
}

// Prefers the API's own error message, falling back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body).map_or_else(
        |_| body.trim().to_string(),
        |parsed| parsed.error.message,
    )
}

fn extract_text(response: CompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(CompletionError::EmptyResponse)
}
