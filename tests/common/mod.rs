// Shared fakes for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use english_coach::config::Config;
use english_coach::context::AppContext;
use english_coach::credentials::{ParameterStore, ParameterStoreError};
use english_coach::http::client::{CompletionClient, CompletionError};
use english_coach::models::gateway::InboundEvent;
use english_coach::models::openai::CompletionRequest;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "sk-test-key";

/// Parameter store that counts lookups and serves a fixed map.
#[derive(Default)]
pub struct CountingStore {
    values: HashMap<String, String>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn with_api_key() -> Self {
        Self {
            values: HashMap::from([(Config::default().api_key_parameter, TEST_API_KEY.to_string())]),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParameterStore for CountingStore {
    async fn get_parameter(&self, name: &str) -> Result<String, ParameterStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterStoreError::NotFound(name.to_string()))
    }
}

/// Completion client that replies with scripted text and records requests.
pub struct ScriptedCompletion {
    reply: Result<String, u16>,
    requests: Mutex<Vec<(String, CompletionRequest)>>,
}

impl ScriptedCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an API error carrying `status`.
    pub fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, CompletionRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        self.requests
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(CompletionError::Api {
                status: *status,
                message: "Rate limit reached for gpt-4o-mini in organization org-secret".to_string(),
            }),
        }
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub store: Arc<CountingStore>,
    pub completion: Arc<ScriptedCompletion>,
}

pub fn harness(store: CountingStore, completion: ScriptedCompletion) -> Harness {
    let store = Arc::new(store);
    let completion = Arc::new(completion);
    let ctx = AppContext::new(Config::default(), store.clone(), completion.clone());
    Harness {
        ctx,
        store,
        completion,
    }
}

/// Harness with a working credential and a scripted completion reply.
pub fn replying(text: &str) -> Harness {
    harness(CountingStore::with_api_key(), ScriptedCompletion::replying(text))
}

pub fn post(body: &str) -> InboundEvent {
    InboundEvent {
        http_method: "POST".to_string(),
        body: Some(body.to_string()),
        headers: HashMap::from([("Content-Type".to_string(), "application/json".to_string())]),
    }
}

pub fn options(body: Option<&str>) -> InboundEvent {
    InboundEvent {
        http_method: "OPTIONS".to_string(),
        body: body.map(ToString::to_string),
        headers: HashMap::new(),
    }
}

pub fn json_body(body: &str) -> serde_json::Value {
    serde_json::from_str(body).unwrap()
}
