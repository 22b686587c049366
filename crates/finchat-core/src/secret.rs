//! Secret provider port and resolution chain.
//!
//! Concrete providers (secrets file, environment) live in finchat-infra.
//! `SecretService` walks them in priority order; the first non-empty value
//! wins. A failing provider is logged and skipped.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use finchat_types::error::SecretError;

/// Trait for read-only secret backends.
pub trait SecretProvider: Send + Sync {
    /// Short label for logs (e.g., "env", "file").
    fn name(&self) -> &str;

    /// Retrieve a secret value by key. Returns None if this provider lacks it.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, SecretError>> + Send;
}

/// Object-safe version of [`SecretProvider`].
pub trait SecretProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>>;
}

impl<T: SecretProvider> SecretProviderDyn for T {
    fn name(&self) -> &str {
        SecretProvider::name(self)
    }

    fn get_boxed<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, SecretError>> + Send + 'a>> {
        Box::pin(self.get(key))
    }
}

pub type DynSecretProvider = Arc<dyn SecretProviderDyn>;

/// Resolves secrets through a chain of providers in priority order.
pub struct SecretService {
    providers: Vec<DynSecretProvider>,
}

impl SecretService {
    /// Providers should be ordered by precedence (highest priority first).
    pub fn new(providers: Vec<DynSecretProvider>) -> Self {
        Self { providers }
    }

    /// First non-blank value wins. Blank values count as absent, and a
    /// provider error falls through to the next provider.
    pub async fn get_secret(&self, key: &str) -> Option<String> {
        for provider in &self.providers {
            match provider.get_boxed(key).await {
                Ok(Some(value)) if value.trim().is_empty() => {
                    debug!(provider = provider.name(), key, "Ignoring blank secret value");
                }
                Ok(Some(value)) => {
                    debug!(provider = provider.name(), key, "Secret resolved");
                    return Some(value);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(provider = provider.name(), key, error = %e, "Secret provider failed, trying next");
                }
            }
        }
        None
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}
