pub mod article;
pub mod error;
pub mod evaluation;
pub mod gateway;
pub mod openai;
pub mod summary;

pub use article::{ArticleRequest, ArticleResponse};
pub use error::{ConfigurationError, HandlerError, ProcessingError, ValidationError};
pub use evaluation::{TenseRequest, UsageEvaluation, WordUsageRequest};
pub use gateway::{InboundEvent, OutboundResponse};
pub use summary::{CategoryScore, SummaryEvaluation, SummaryRequest};
