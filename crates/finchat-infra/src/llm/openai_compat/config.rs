//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct
//! base URL.

use secrecy::SecretString;

use finchat_observe::genai_attrs::{PROVIDER_GEMINI, PROVIDER_MISTRAL, PROVIDER_OPENAI};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Configuration for an OpenAI-compatible provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model, used when a request leaves the model empty.
    pub model: String,
}

/// Built-in base URL for a well-known provider name.
pub fn default_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        PROVIDER_OPENAI => Some(OPENAI_BASE_URL),
        PROVIDER_GEMINI => Some(GEMINI_BASE_URL),
        PROVIDER_MISTRAL => Some(MISTRAL_BASE_URL),
        _ => None,
    }
}

fn defaults(provider_name: &str, base_url: &str, api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: provider_name.into(),
        base_url: base_url.into(),
        api_key,
        model: model.into(),
    }
}

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    defaults(PROVIDER_OPENAI, OPENAI_BASE_URL, api_key, model)
}

/// Google Gemini default configuration (OpenAI-compatible beta endpoint).
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    defaults(PROVIDER_GEMINI, GEMINI_BASE_URL, api_key, model)
}

/// Mistral AI default configuration.
pub fn mistral_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    defaults(PROVIDER_MISTRAL, MISTRAL_BASE_URL, api_key, model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn key() -> SecretString {
        SecretString::from("sk-test".to_string())
    }

    #[test]
    fn test_openai_defaults() {
        let config = openai_defaults(key(), "gpt-4o-mini");
        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api_key.expose_secret(), "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_gemini_defaults() {
        let config = gemini_defaults(key(), "gemini-2.5-flash");
        assert_eq!(config.provider_name, "gemini");
        assert!(config.base_url.contains("generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_mistral_defaults() {
        let config = mistral_defaults(key(), "mistral-small-latest");
        assert_eq!(config.base_url, "https://api.mistral.ai/v1");
    }

    #[test]
    fn test_default_base_url_lookup() {
        assert_eq!(default_base_url("openai"), Some(OPENAI_BASE_URL));
        assert_eq!(default_base_url("mistral"), Some(MISTRAL_BASE_URL));
        assert_eq!(default_base_url("local"), None);
    }
}
