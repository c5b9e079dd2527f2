//! Error types shared by the dispatch pipeline.
//!
//! Each kind maps to exactly one HTTP status in [`HandlerError::status_code`].
//! Validation and configuration messages are safe to return to callers;
//! everything else is replaced by [`GENERIC_ERROR_MESSAGE`].

use std::fmt;

use crate::http::client::CompletionError;

/// Message returned to callers for any unexpected failure.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// The request body was well-formed JSON but did not match the capability's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ValidationError {}

/// A required credential could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError(String);

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigurationError {}

/// Failure while processing a validated request.
#[derive(Debug)]
pub enum ProcessingError {
    /// Credential lookup failed
    Configuration(ConfigurationError),
    /// The completion API call failed
    Upstream(CompletionError),
    /// The model answered in a shape the capability cannot use
    Parse(String),
    /// The result could not be encoded as JSON
    Serialization(serde_json::Error),
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "Configuration error: {e}"),
            Self::Upstream(e) => write!(f, "Completion API error: {e}"),
            Self::Parse(msg) => write!(f, "Unparseable model output: {msg}"),
            Self::Serialization(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for ProcessingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Upstream(e) => Some(e),
            Self::Parse(_) => None,
            Self::Serialization(e) => Some(e),
        }
    }
}

impl From<ConfigurationError> for ProcessingError {
    fn from(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }
}

impl From<CompletionError> for ProcessingError {
    fn from(error: CompletionError) -> Self {
        Self::Upstream(error)
    }
}

/// Every way a non-preflight request can fail.
#[derive(Debug)]
pub enum HandlerError {
    /// The body was not valid JSON
    InvalidBody(String),
    Validation(ValidationError),
    Processing(ProcessingError),
}

impl HandlerError {
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidBody(_) | Self::Validation(_) => 400,
            Self::Processing(_) => 500,
        }
    }

    /// The message that is safe to send back to the caller.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidBody(msg) => msg.clone(),
            Self::Validation(e) => e.to_string(),
            Self::Processing(ProcessingError::Configuration(e)) => e.to_string(),
            Self::Processing(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Whether the failure is the caller's fault rather than ours.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBody(msg) => f.write_str(msg),
            Self::Validation(e) => write!(f, "Validation error: {e}"),
            Self::Processing(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for HandlerError {}

impl From<ValidationError> for HandlerError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

impl From<ProcessingError> for HandlerError {
    fn from(error: ProcessingError) -> Self {
        Self::Processing(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400_with_message() {
        let err = HandlerError::from(ValidationError::new("'word' cannot be empty"));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "'word' cannot be empty");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_configuration_maps_to_500_with_message() {
        let err = HandlerError::from(ProcessingError::from(ConfigurationError::new(
            "Failed to retrieve parameter: /x",
        )));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Failed to retrieve parameter: /x");
    }

    #[test]
    fn test_parse_failure_is_not_leaked() {
        let err = HandlerError::from(ProcessingError::Parse("label 'Coherence' not found".into()));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), GENERIC_ERROR_MESSAGE);
        assert!(err.to_string().contains("Coherence"));
    }
}
