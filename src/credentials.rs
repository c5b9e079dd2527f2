//! Lazily populated credential cache backed by SSM Parameter Store.
//!
//! A value is fetched the first time its name is requested and kept for the
//! lifetime of the process (warm Lambda containers reuse it). There is no
//! TTL and no eviction. The lock is released while the remote lookup runs,
//! so two concurrent first requests for the same name may both hit the
//! store; both write the same value.

use async_trait::async_trait;
use lambda_runtime::tracing::{debug, error, info};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::error::ConfigurationError;

/// Failure looking up a parameter in the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterStoreError {
    NotFound(String),
    /// The parameter exists but has no value
    MissingValue(String),
    /// Any other service or transport failure
    Lookup { name: String, message: String },
}

impl fmt::Display for ParameterStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(name) => write!(f, "Parameter not found: {name}"),
            Self::MissingValue(name) => write!(f, "Parameter has no value: {name}"),
            Self::Lookup { name, message } => {
                write!(f, "Failed to look up parameter {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ParameterStoreError {}

/// Key-value secret lookup by parameter name.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Returns the decrypted value of `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is absent, empty or inaccessible.
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterStoreError>;
}

/// Production store using SSM `GetParameter` with decryption.
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    #[must_use]
    pub const fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn from_sdk_config(config: &aws_config::SdkConfig) -> Self {
        Self::new(aws_sdk_ssm::Client::new(config))
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterStoreError> {
        let output = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_parameter_not_found() {
                    ParameterStoreError::NotFound(name.to_string())
                } else {
                    ParameterStoreError::Lookup {
                        name: name.to_string(),
                        message: service_error.to_string(),
                    }
                }
            })?;

        output
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string)
            .ok_or_else(|| ParameterStoreError::MissingValue(name.to_string()))
    }
}

/// Process-wide credential cache.
///
/// Construct one per process and share it through
/// [`AppContext`](crate::context::AppContext).
pub struct CredentialCache {
    store: Arc<dyn ParameterStore>,
    values: RwLock<HashMap<String, String>>,
}

impl CredentialCache {
    #[must_use]
    pub fn new(store: Arc<dyn ParameterStore>) -> Self {
        Self {
            store,
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the secret stored under `name`, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the backing lookup fails. Failures
    /// are not cached; the next call retries the lookup.
    pub async fn get(&self, name: &str) -> Result<String, ConfigurationError> {
        if let Some(value) = self.cached(name) {
            debug!(parameter = %name, "Credential cache hit");
            return Ok(value);
        }

        info!(parameter = %name, "Fetching credential from parameter store");
        let value = self.store.get_parameter(name).await.map_err(|e| {
            error!(parameter = %name, error = %e, "Failed to retrieve parameter");
            ConfigurationError::new(format!("Failed to retrieve parameter: {name}"))
        })?;

        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value.clone());

        Ok(value)
    }

    /// Number of cached credentials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, name: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }
}
