//! Environment variable secret provider.
//!
//! Checks the key directly as an environment variable name
//! (e.g., `OPENAI_API_KEY`).

use finchat_core::secret::SecretProvider;
use finchat_types::error::SecretError;

/// Read-only provider backed by the process environment.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretProvider for EnvSecretProvider {
    fn name(&self) -> &str {
        "env"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match std::env::var(key) {
            Ok(val) => Ok(Some(val)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            // Present but not valid Unicode: secrets must be strings.
            Err(std::env::VarError::NotUnicode(_)) => Ok(None),
        }
    }
}
