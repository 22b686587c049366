//! Secrets file provider.
//!
//! Reads a flat TOML table from `{data_dir}/secrets.toml`:
//!
//! ```toml
//! OPENAI_API_KEY = "sk-..."
//! ```
//!
//! The file is read on every lookup so edits apply without a restart.

use std::path::{Path, PathBuf};

use finchat_core::secret::SecretProvider;
use finchat_types::error::SecretError;

/// Read-only provider backed by a TOML secrets file.
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provider for `{data_dir}/secrets.toml`.
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("secrets.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for FileSecretProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(SecretError::StorageError(format!(
                    "{}: {err}",
                    self.path.display()
                )));
            }
        };

        let table: toml::Table = toml::from_str(&content)
            .map_err(|e| SecretError::StorageError(format!("{}: {e}", self.path.display())))?;

        Ok(table
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reads_string_value() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("secrets.toml"), "OPENAI_API_KEY = \"sk-file\"\n")
            .await
            .unwrap();

        let provider = FileSecretProvider::in_data_dir(tmp.path());
        let value = provider.get("OPENAI_API_KEY").await.unwrap();
        assert_eq!(value.as_deref(), Some("sk-file"));
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let provider = FileSecretProvider::in_data_dir(tmp.path());
        assert!(provider.get("OPENAI_API_KEY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_string_value_is_none() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("secrets.toml"), "OPENAI_API_KEY = 42\n")
            .await
            .unwrap();

        let provider = FileSecretProvider::in_data_dir(tmp.path());
        assert!(provider.get("OPENAI_API_KEY").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("secrets.toml"), "not = [valid")
            .await
            .unwrap();

        let provider = FileSecretProvider::in_data_dir(tmp.path());
        let err = provider.get("OPENAI_API_KEY").await.unwrap_err();
        assert!(matches!(err, SecretError::StorageError(_)));
    }
}
