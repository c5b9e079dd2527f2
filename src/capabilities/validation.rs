//! Field extraction for JSON request bodies.

use serde_json::{Map, Value};

use crate::models::error::ValidationError;

/// Read-only view over a JSON object body.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// # Errors
    ///
    /// Returns an error if the body is not a JSON object.
    pub fn from_body(body: &'a Value) -> Result<Self, ValidationError> {
        body.as_object()
            .map(|map| Self { map })
            .ok_or_else(|| ValidationError::new("Request body must be a JSON object"))
    }

    /// Returns the trimmed value of a required, non-blank string field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing, not a string, or blank.
    pub fn required_str(&self, name: &str) -> Result<String, ValidationError> {
        let value = self
            .map
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| ValidationError::new(format!("'{name}' must be a string")))?
            .trim();

        if value.is_empty() {
            return Err(ValidationError::new(format!("'{name}' cannot be empty")));
        }

        Ok(value.to_string())
    }

    /// Rejects keys outside `allowed`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unexpected key, in key order.
    pub fn deny_unknown(&self, allowed: &[&str]) -> Result<(), ValidationError> {
        self.map
            .keys()
            .find(|key| !allowed.contains(&key.as_str()))
            .map_or(Ok(()), |key| {
                Err(ValidationError::new(format!("unknown field '{key}'")))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_str_trims() {
        let body = json!({"word": "  ephemeral \n"});
        let fields = Fields::from_body(&body).unwrap();
        assert_eq!(fields.required_str("word").unwrap(), "ephemeral");
    }

    #[test]
    fn test_required_str_missing_and_mistyped() {
        let body = json!({"word": 42});
        let fields = Fields::from_body(&body).unwrap();
        assert_eq!(
            fields.required_str("word").unwrap_err().message(),
            "'word' must be a string"
        );
        assert_eq!(
            fields.required_str("sentence").unwrap_err().message(),
            "'sentence' must be a string"
        );
    }

    #[test]
    fn test_required_str_blank() {
        let body = json!({"sentence": " \t "});
        let fields = Fields::from_body(&body).unwrap();
        assert_eq!(
            fields.required_str("sentence").unwrap_err().message(),
            "'sentence' cannot be empty"
        );
    }

    #[test]
    fn test_non_object_body() {
        assert!(Fields::from_body(&json!(["word"])).is_err());
        assert!(Fields::from_body(&json!("word")).is_err());
    }

    #[test]
    fn test_deny_unknown() {
        let body = json!({"word": "a", "sentence": "b", "lang": "fr"});
        let fields = Fields::from_body(&body).unwrap();
        assert!(fields.deny_unknown(&["word", "sentence", "lang"]).is_ok());
        assert_eq!(
            fields.deny_unknown(&["word", "sentence"]).unwrap_err().message(),
            "unknown field 'lang'"
        );
    }
}
