//! LLM provider abstractions for finchat.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: object-safe wrapper for runtime provider selection
//! - `CompletionClient`: one bounded request/response exchange per turn

pub mod box_provider;
pub mod completion;
pub mod provider;
