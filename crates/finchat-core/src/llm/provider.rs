//! LlmProvider trait definition.
//!
//! This is the core abstraction that every completion backend implements.

use finchat_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion endpoint backends (OpenAI, Gemini, Mistral, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in finchat-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
