//! Shared collaborators handed to every capability.

use lambda_runtime::tracing::{error, info};
use std::sync::Arc;

use crate::config::Config;
use crate::credentials::{CredentialCache, ParameterStore, SsmParameterStore};
use crate::http::client::{CompletionClient, OpenAiClient};
use crate::models::error::ProcessingError;
use crate::models::openai::{ChatMessage, CompletionRequest};

/// Configuration, credential cache and completion client for one process.
///
/// Cloning is cheap and shares the same cache.
#[derive(Clone)]
pub struct AppContext {
    config: Arc<Config>,
    credentials: Arc<CredentialCache>,
    completion: Arc<dyn CompletionClient>,
}

impl AppContext {
    #[must_use]
    pub fn new(
        config: Config,
        store: Arc<dyn ParameterStore>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            credentials: Arc::new(CredentialCache::new(store)),
            completion,
        }
    }

    /// Production wiring: SSM for credentials, `OpenAI` over the shared HTTP client.
    pub async fn from_env(config: Config) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let store = Arc::new(SsmParameterStore::from_sdk_config(&sdk_config));
        let completion = Arc::new(OpenAiClient::with_shared_client(config.base_url.clone()));
        info!(
            model = %config.model,
            parameter = %config.api_key_parameter,
            "Initialised application context"
        );
        Self::new(config, store, completion)
    }

    #[must_use]
    pub fn credentials(&self) -> &CredentialCache {
        &self.credentials
    }

    /// Runs one chat completion with the configured model.
    ///
    /// The API key is resolved through the credential cache on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError::Configuration`] if the API key cannot be
    /// retrieved and [`ProcessingError::Upstream`] if the completion call fails.
    pub async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: Option<u32>,
    ) -> Result<String, ProcessingError> {
        let api_key = self.credentials.get(&self.config.api_key_parameter).await?;

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature,
            max_tokens,
        };

        self.completion
            .complete(&api_key, &request)
            .await
            .map_err(|e| {
                error!(error = %e, model = %request.model, "Completion call failed");
                ProcessingError::from(e)
            })
    }
}
