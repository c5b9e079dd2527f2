//! Process configuration, read once at cold start.

/// Parameter Store name holding the `OpenAI` API key.
pub const DEFAULT_API_KEY_PARAMETER: &str = "/EnglishLearning/OPENAI_API_KEY";
/// Chat model used by every capability.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const API_KEY_PARAMETER_VAR: &str = "OPENAI_API_KEY_PARAMETER";
const MODEL_VAR: &str = "OPENAI_MODEL";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key_parameter: String,
    pub model: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key_parameter: DEFAULT_API_KEY_PARAMETER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to the defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            api_key_parameter: read(API_KEY_PARAMETER_VAR, DEFAULT_API_KEY_PARAMETER),
            model: read(MODEL_VAR, DEFAULT_MODEL),
            base_url: read(BASE_URL_VAR, DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
            ("OPENAI_API_KEY_PARAMETER", "/AIEval/OPENAI_API_KEY"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.api_key_parameter, "/AIEval/OPENAI_API_KEY");
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = Config::from_lookup(|key| (key == "OPENAI_MODEL").then(|| "  ".to_string()));
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
