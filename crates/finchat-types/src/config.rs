//! Application configuration types for finchat.
//!
//! `AppConfig` represents `{data_dir}/config.toml`. Every field is optional
//! in the file; missing values fall back to the defaults below.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chat::FirmSettings;

/// Default number of services returned by the matcher.
pub const DEFAULT_TOP_K: usize = 3;

/// Default completion request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Default idle time before an HTTP session is evicted, in seconds.
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 1800;

/// Default catalog file name, resolved relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "services.yaml";

/// Top-level configuration for finchat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the YAML service catalog.
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Maximum shortlist length per turn.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Upper bound on a single completion call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Newest N non-system messages sent per request. Unset sends everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_window: Option<usize>,

    /// Optional cap on completion length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Sessions idle longer than this are evicted by `finchat serve`.
    /// Zero disables eviction.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    #[serde(default)]
    pub provider: ProviderSettings,

    /// Defaults applied to every new session.
    #[serde(default)]
    pub firm: FirmSettings,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_session_idle_secs() -> u64 {
    DEFAULT_SESSION_IDLE_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            top_k: default_top_k(),
            request_timeout_secs: default_request_timeout_secs(),
            history_window: None,
            max_output_tokens: None,
            session_idle_secs: default_session_idle_secs(),
            provider: ProviderSettings::default(),
            firm: FirmSettings::default(),
        }
    }
}

/// Which OpenAI-compatible endpoint to talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Provider name: `openai`, `gemini`, `mistral`, or a custom label.
    #[serde(default = "default_provider_name")]
    pub name: String,

    /// Base URL override. Required for custom provider names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_provider_name() -> String {
    "openai".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.catalog_path, PathBuf::from("services.yaml"));
        assert_eq!(config.top_k, 3);
        assert_eq!(config.request_timeout_secs, 60);
        assert!(config.history_window.is_none());
        assert_eq!(config.session_idle_secs, 1800);
        assert_eq!(config.provider.name, "openai");
        assert_eq!(config.firm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.top_k, DEFAULT_TOP_K);
        assert!(config.max_output_tokens.is_none());
        assert!(config.provider.base_url.is_none());
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
catalog_path = "/etc/finchat/services.yaml"
top_k = 5
request_timeout_secs = 15
history_window = 20
session_idle_secs = 0

[provider]
name = "local"
base_url = "http://localhost:11434/v1"

[firm]
firm_name = "Acme CPA"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("/etc/finchat/services.yaml"));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.history_window, Some(20));
        assert_eq!(config.session_idle_secs, 0);
        assert_eq!(config.provider.name, "local");
        assert_eq!(
            config.provider.base_url.as_deref(),
            Some("http://localhost:11434/v1")
        );
        assert_eq!(config.firm.firm_name, "Acme CPA");
        assert_eq!(config.firm.contact_email, "info@zackfinancial.com");
    }
}
