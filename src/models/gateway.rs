//! API Gateway proxy event and response models.
//!
//! Only the fields the handlers read are modelled; everything else in the
//! gateway payload is ignored on deserialisation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::collections::HashMap;

const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
const CONTENT_TYPE: &str = "Content-Type";

/// Inbound proxy event, as sent by API Gateway
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: HashMap<String, String>,
}

impl InboundEvent {
    #[must_use]
    pub fn is_preflight(&self) -> bool {
        self.http_method.eq_ignore_ascii_case("OPTIONS")
    }

    /// Request body, with absent and empty bodies both treated as `{}`.
    #[must_use]
    pub fn body_or_empty_object(&self) -> &str {
        match self.body.as_deref() {
            Some(body) if !body.is_empty() => body,
            _ => "{}",
        }
    }
}

// API Gateway sends explicit `null` for absent headers and methods
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Proxy response returned to API Gateway
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl OutboundResponse {
    /// 200 with a JSON body.
    #[must_use]
    pub fn success(allowed_methods: &str, body: String) -> Self {
        let mut headers = cors_headers(allowed_methods);
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        Self {
            status_code: 200,
            headers,
            body,
        }
    }

    /// Error response with an `{"error": message}` body.
    #[must_use]
    pub fn error(allowed_methods: &str, status_code: u16, message: &str) -> Self {
        let mut headers = cors_headers(allowed_methods);
        headers.insert(CONTENT_TYPE.to_string(), "application/json".to_string());
        Self {
            status_code,
            headers,
            body: json!({ "error": message }).to_string(),
        }
    }

    /// Preflight answer: CORS headers only.
    #[must_use]
    pub fn preflight(allowed_methods: &str) -> Self {
        Self {
            status_code: 200,
            headers: cors_headers(allowed_methods),
            body: String::new(),
        }
    }
}

fn cors_headers(allowed_methods: &str) -> HashMap<String, String> {
    HashMap::from([
        (ALLOW_ORIGIN.to_string(), "*".to_string()),
        (ALLOW_METHODS.to_string(), allowed_methods.to_string()),
        (ALLOW_HEADERS.to_string(), CONTENT_TYPE.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_event_parsing_with_nulls() {
        let event: InboundEvent = serde_json::from_value(json!({
            "httpMethod": "POST",
            "body": null,
            "headers": null,
            "requestContext": {"stage": "prod"}
        }))
        .unwrap();

        assert_eq!(event.http_method, "POST");
        assert!(event.body.is_none());
        assert!(event.headers.is_empty());
        assert_eq!(event.body_or_empty_object(), "{}");
    }

    #[test]
    fn test_empty_body_is_empty_object() {
        let event = InboundEvent {
            http_method: "POST".into(),
            body: Some(String::new()),
            headers: HashMap::new(),
        };
        assert_eq!(event.body_or_empty_object(), "{}");
    }

    #[test]
    fn test_preflight_is_case_insensitive() {
        let event = InboundEvent {
            http_method: "options".into(),
            ..InboundEvent::default()
        };
        assert!(event.is_preflight());
    }

    #[test]
    fn test_error_response_shape() {
        let response = OutboundResponse::error("POST,OPTIONS", 400, "'word' must be a string");
        let encoded = serde_json::to_value(&response).unwrap();

        assert_eq!(encoded["statusCode"], 400);
        assert_eq!(encoded["headers"]["Access-Control-Allow-Origin"], "*");
        assert_eq!(encoded["headers"]["Access-Control-Allow-Methods"], "POST,OPTIONS");
        assert_eq!(encoded["headers"]["Access-Control-Allow-Headers"], "Content-Type");

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["error"], "'word' must be a string");
    }

    #[test]
    fn test_preflight_has_empty_body() {
        let response = OutboundResponse::preflight("GET,POST,OPTIONS");
        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert!(!response.headers.contains_key("Content-Type"));
    }
}
