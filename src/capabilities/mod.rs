//! One module per API endpoint.
//!
//! A capability turns a raw JSON body into a typed request ([`Capability::validate`])
//! and a typed request into a typed response ([`Capability::process`]). The
//! generic [`dispatch`](crate::handler::dispatch) function owns everything
//! else: preflight, body parsing, status codes, logging.

pub mod article;
pub mod summary;
pub mod tense;
pub mod validation;
pub mod verdict;
pub mod word_usage;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::context::AppContext;
use crate::models::error::{ProcessingError, ValidationError};

pub use article::{ArticleGenerator, TOPICS};
pub use summary::SummaryEvaluator;
pub use tense::TenseEvaluator;
pub use word_usage::WordUsageEvaluator;

/// An endpoint served by the shared dispatch pipeline.
#[async_trait]
pub trait Capability: Send + Sync {
    type Request: Send;
    type Response: Serialize + Send;

    /// Name used in logs.
    const NAME: &'static str;
    /// Value of `Access-Control-Allow-Methods`; always includes `OPTIONS`.
    const ALLOWED_METHODS: &'static str;

    /// Converts the parsed body into a typed request.
    ///
    /// Pure and synchronous: no I/O happens here.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    fn validate(&self, body: &Value) -> Result<Self::Request, ValidationError>;

    /// Produces the response for a validated request.
    ///
    /// # Errors
    ///
    /// Returns a [`ProcessingError`] if the credential lookup or completion
    /// call fails, or if the model output cannot be used.
    async fn process(
        &self,
        ctx: &AppContext,
        request: Self::Request,
    ) -> Result<Self::Response, ProcessingError>;
}
