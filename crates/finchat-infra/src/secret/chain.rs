//! Secret chain builder: wires concrete providers in priority order.
//!
//! Chain order: `[FileSecretProvider, EnvSecretProvider]`, first match wins.

use std::path::Path;
use std::sync::Arc;

use secrecy::SecretString;

use finchat_core::secret::{DynSecretProvider, SecretService};

use crate::secret::env::EnvSecretProvider;
use crate::secret::file::FileSecretProvider;

/// Name of the completion endpoint credential.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Build the default secret resolution chain for `data_dir`.
pub fn build_secret_chain(data_dir: &Path) -> Vec<DynSecretProvider> {
    let mut chain: Vec<DynSecretProvider> = Vec::new();
    chain.push(Arc::new(FileSecretProvider::in_data_dir(data_dir)));
    chain.push(Arc::new(EnvSecretProvider::new()));
    chain
}

/// Resolve the API key through `service`.
///
/// Missing or blank values yield `None` with a warning; the caller runs
/// offline in that case.
pub async fn resolve_api_key(service: &SecretService) -> Option<SecretString> {
    match service.get_secret(OPENAI_API_KEY).await {
        Some(key) => Some(SecretString::from(key)),
        None => {
            tracing::warn!(
                "No {OPENAI_API_KEY} found. Add it to secrets.toml or the environment to enable responses."
            );
            None
        }
    }
}
