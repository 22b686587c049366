//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`]
//! trait defined in `finchat-core`, plus the factory that turns
//! [`ProviderSettings`] and a resolved key into a [`CompletionClient`].
//!
//! [`LlmProvider`]: finchat_core::llm::provider::LlmProvider

pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;

use finchat_core::llm::box_provider::BoxLlmProvider;
use finchat_core::llm::completion::CompletionClient;
use finchat_types::config::{AppConfig, ProviderSettings};
use finchat_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, default_base_url};

/// Create a [`BoxLlmProvider`] from [`ProviderSettings`].
///
/// An explicit `base_url` always wins. Otherwise the provider name must be
/// one of the well-known endpoints (openai, gemini, mistral).
///
/// # Errors
///
/// Returns [`LlmError::InvalidRequest`] for an unknown provider name with no
/// `base_url`.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: SecretString,
    model: &str,
) -> Result<BoxLlmProvider, LlmError> {
    let base_url = match settings.base_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => default_base_url(&settings.name)
            .ok_or_else(|| {
                LlmError::InvalidRequest(format!(
                    "unknown provider '{}' and no base_url configured",
                    settings.name
                ))
            })?
            .to_string(),
    };

    let provider = OpenAiCompatibleProvider::new(OpenAiCompatConfig {
        provider_name: settings.name.clone(),
        base_url,
        api_key,
        model: model.to_string(),
    });
    Ok(BoxLlmProvider::new(provider))
}

/// Build the completion client for this process.
///
/// Without a key, or when the provider cannot be constructed, the client
/// runs offline and every turn gets the offline reply.
pub fn build_completion_client(config: &AppConfig, api_key: Option<SecretString>) -> CompletionClient {
    let Some(api_key) = api_key else {
        tracing::info!("No API key configured; running offline");
        return CompletionClient::offline();
    };

    match create_provider(&config.provider, api_key, &config.firm.model) {
        Ok(provider) => {
            tracing::info!(provider = provider.name(), "Completion provider ready");
            CompletionClient::new(provider, Duration::from_secs(config.request_timeout_secs))
                .with_max_output_tokens(config.max_output_tokens)
        }
        Err(e) => {
            tracing::warn!("Failed to create provider: {e}; running offline");
            CompletionClient::offline()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::from("sk-test".to_string())
    }

    fn settings(name: &str, base_url: Option<&str>) -> ProviderSettings {
        ProviderSettings {
            name: name.to_string(),
            base_url: base_url.map(str::to_string),
        }
    }

    #[test]
    fn test_create_provider_known_names() {
        for name in ["openai", "gemini", "mistral"] {
            let provider = create_provider(&settings(name, None), key(), "m").unwrap();
            assert_eq!(provider.name(), name);
        }
    }

    #[test]
    fn test_create_provider_with_base_url() {
        let provider = create_provider(
            &settings("local", Some("http://localhost:11434/v1")),
            key(),
            "llama3",
        )
        .unwrap();
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_create_provider_unknown_without_base_url() {
        let err = create_provider(&settings("mystery", None), key(), "m").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));

        let err = create_provider(&settings("mystery", Some("  ")), key(), "m").unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }

    #[test]
    fn test_build_client_without_key_is_offline() {
        let client = build_completion_client(&AppConfig::default(), None);
        assert!(!client.is_configured());
    }

    #[test]
    fn test_build_client_with_key() {
        let mut config = AppConfig::default();
        config.request_timeout_secs = 5;
        let client = build_completion_client(&config, Some(key()));
        assert!(client.is_configured());
        assert_eq!(client.provider_name(), Some("openai"));
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_build_client_unknown_provider_is_offline() {
        let mut config = AppConfig::default();
        config.provider = settings("mystery", None);
        let client = build_completion_client(&config, Some(key()));
        assert!(!client.is_configured());
    }
}
