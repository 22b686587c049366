//! Configuration loader for finchat.
//!
//! Reads `config.toml` from the data directory (`~/.finchat/` by default)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use finchat_types::config::AppConfig;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "FINCHAT_DATA_DIR";

/// Environment variable overriding the catalog path.
pub const CATALOG_ENV: &str = "FINCHAT_CATALOG";

pub const FIRM_NAME_ENV: &str = "FIRM_NAME";
pub const CONTACT_EMAIL_ENV: &str = "CONTACT_EMAIL";
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";

/// Resolve the data directory.
///
/// `FINCHAT_DATA_DIR` wins, then `~/.finchat`, then `./.finchat`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".finchat");
    }

    PathBuf::from(".finchat")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and
///   returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Apply `FIRM_NAME`, `CONTACT_EMAIL`, `MODEL_NAME` and `FINCHAT_CATALOG`
/// from the process environment.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Blank values are ignored.
pub fn apply_overrides_from(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(v) = get(FIRM_NAME_ENV) {
        config.firm.firm_name = v;
    }
    if let Some(v) = get(CONTACT_EMAIL_ENV) {
        config.firm.contact_email = v;
    }
    if let Some(v) = get(MODEL_NAME_ENV) {
        config.firm.model = v;
    }
    if let Some(v) = get(CATALOG_ENV) {
        config.catalog_path = PathBuf::from(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.top_k, 3);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.firm.firm_name, "Zack Financial");
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
top_k = 2
history_window = 10
max_output_tokens = 400

[provider]
name = "mistral"

[firm]
contact_email = "team@acme.test"
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.top_k, 2);
        assert_eq!(config.history_window, Some(10));
        assert_eq!(config.max_output_tokens, Some(400));
        assert_eq!(config.provider.name, "mistral");
        assert_eq!(config.firm.contact_email, "team@acme.test");
        assert_eq!(config.firm.firm_name, "Zack Financial");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.top_k, 3);
        assert!(config.history_window.is_none());
    }

    #[test]
    fn overrides_replace_firm_settings_and_catalog() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("FIRM_NAME", "Acme CPA"),
            ("MODEL_NAME", "gpt-4o"),
            ("FINCHAT_CATALOG", "/srv/services.yaml"),
        ]);
        let mut config = AppConfig::default();
        apply_overrides_from(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.firm.firm_name, "Acme CPA");
        assert_eq!(config.firm.model, "gpt-4o");
        assert_eq!(config.firm.contact_email, "info@zackfinancial.com");
        assert_eq!(config.catalog_path, PathBuf::from("/srv/services.yaml"));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        apply_overrides_from(&mut config, |k| {
            (k == "FIRM_NAME").then(|| "   ".to_string())
        });
        assert_eq!(config.firm.firm_name, "Zack Financial");
    }
}
