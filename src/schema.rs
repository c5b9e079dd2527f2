//! JSON Schemas for every endpoint's request and response bodies.
//!
//! Consumed by the `generate-schema` binary; frontends use the output to
//! validate payloads before calling the API.

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

use crate::capabilities::{
    ArticleGenerator, Capability, SummaryEvaluator, TenseEvaluator, WordUsageEvaluator,
};

/// Schema description of one API endpoint
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: &'static str,
    pub description: &'static str,
    pub methods: &'static str,
    pub request_schema: Value,
    pub response_schema: Value,
}

impl Endpoint {
    fn of<C>(description: &'static str) -> Self
    where
        C: Capability,
        C::Request: JsonSchema,
        C::Response: JsonSchema,
    {
        Self {
            name: C::NAME,
            description,
            methods: C::ALLOWED_METHODS,
            request_schema: body_schema::<C::Request>(),
            response_schema: body_schema::<C::Response>(),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "methods": self.methods,
            "requestSchema": self.request_schema,
            "responseSchema": self.response_schema,
        })
    }
}

/// All endpoints served by this crate.
#[must_use]
pub fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::of::<ArticleGenerator>(
            "Generate a short two-paragraph Markdown article about a random topic for reading practice.",
        ),
        Endpoint::of::<WordUsageEvaluator>(
            "Judge whether a vocabulary word is used correctly in a sentence.",
        ),
        Endpoint::of::<TenseEvaluator>(
            "Judge whether a sentence correctly uses the requested verb tense.",
        ),
        Endpoint::of::<SummaryEvaluator>(
            "Score a summary of an article for grammar & spelling and coherence (0-100 each).",
        ),
    ]
}

// Strips generator metadata that frontends do not need
fn body_schema<T: JsonSchema>() -> Value {
    let mut schema = serde_json::to_value(schema_for!(T)).unwrap_or(Value::Null);
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_names_are_unique() {
        let endpoints = endpoints();
        let mut names: Vec<_> = endpoints.iter().map(|e| e.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), endpoints.len());
    }

    #[test]
    fn test_body_schema_drops_metadata() {
        let schema = body_schema::<crate::models::WordUsageRequest>();
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("title").is_none());
        assert_eq!(schema["type"], "object");
    }
}
