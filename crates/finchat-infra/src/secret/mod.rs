//! Secret provider implementations.
//!
//! - `file`: `{data_dir}/secrets.toml` (read-only, highest priority)
//! - `env`: environment variables (read-only)
//! - `chain`: wires the providers together and resolves the API key

pub mod chain;
pub mod env;
pub mod file;

pub use chain::{build_secret_chain, resolve_api_key, OPENAI_API_KEY};
pub use env::EnvSecretProvider;
pub use file::FileSecretProvider;
