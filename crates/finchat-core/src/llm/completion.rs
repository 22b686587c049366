//! Completion client: one bounded request/response exchange per user turn.
//!
//! The provider call runs on a spawned worker task and is awaited with an
//! explicit timeout. Failures never propagate; they are rendered into the
//! reply text so the conversation can continue.

use std::sync::Arc;
use std::time::Duration;

use tracing::{Instrument, field, info_span, warn};

use finchat_observe::genai_attrs::{
    GEN_AI_RESPONSE_FINISH_REASONS, GEN_AI_RESPONSE_ID, GEN_AI_USAGE_INPUT_TOKENS,
    GEN_AI_USAGE_OUTPUT_TOKENS,
};
use finchat_types::chat::TurnStatus;
use finchat_types::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use finchat_types::llm::{CompletionRequest, LlmError, Message, MessageRole};

use super::box_provider::BoxLlmProvider;

/// Reply used when no credential is configured.
pub const OFFLINE_REPLY: &str =
    "I'm currently offline; please configure OPENAI_API_KEY to enable responses.";

/// Prefix of the reply used when the endpoint call fails.
pub const ERROR_REPLY_PREFIX: &str = "Error reaching the model";

/// Assistant text produced for one turn, with how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub content: String,
    pub status: TurnStatus,
}

impl CompletionOutcome {
    fn offline() -> Self {
        Self {
            content: OFFLINE_REPLY.to_string(),
            status: TurnStatus::Offline,
        }
    }

    fn failed(error: &LlmError) -> Self {
        Self {
            content: format!("{ERROR_REPLY_PREFIX}: {error}"),
            status: TurnStatus::Failed,
        }
    }
}

/// Sends conversation history to the configured provider.
///
/// Cheap to clone; the provider is shared behind an `Arc`. A client built
/// with [`CompletionClient::offline`] never touches the network.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    provider: Option<Arc<BoxLlmProvider>>,
    timeout: Duration,
    max_output_tokens: Option<u32>,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, timeout: Duration) -> Self {
        Self {
            provider: Some(Arc::new(provider)),
            timeout,
            max_output_tokens: None,
        }
    }

    /// Client with no credential; every call returns [`OFFLINE_REPLY`].
    pub fn offline() -> Self {
        Self {
            provider: None,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_output_tokens: None,
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: Option<u32>) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(BoxLlmProvider::name)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the outbound request: guidance as system text, then every
    /// non-system message of `history` in order.
    pub fn build_request(
        &self,
        history: &[Message],
        system_guidance: &str,
        model: &str,
    ) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: history
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .cloned()
                .collect(),
            system: Some(system_guidance.to_string()),
            max_tokens: self.max_output_tokens,
        }
    }

    /// Run one completion. Never fails: errors become the reply text.
    pub async fn complete(
        &self,
        history: &[Message],
        system_guidance: &str,
        model: &str,
    ) -> CompletionOutcome {
        let Some(provider) = self.provider.clone() else {
            return CompletionOutcome::offline();
        };

        let request = self.build_request(history, system_guidance, model);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.system = provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.messages = request.messages.len(),
            gen_ai.response.id = field::Empty,
            gen_ai.response.finish_reasons = field::Empty,
            gen_ai.usage.input_tokens = field::Empty,
            gen_ai.usage.output_tokens = field::Empty,
        );

        let mut worker = tokio::spawn(
            async move { provider.complete(&request).await }.instrument(span.clone()),
        );

        let result = match tokio::time::timeout(self.timeout, &mut worker).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(LlmError::Worker(join_error.to_string())),
            Err(_) => {
                worker.abort();
                Err(LlmError::Timeout(self.timeout))
            }
        };

        match result {
            Ok(response) => {
                span.record(GEN_AI_RESPONSE_ID, response.id.as_str());
                span.record(GEN_AI_RESPONSE_FINISH_REASONS, field::display(&response.stop_reason));
                span.record(GEN_AI_USAGE_INPUT_TOKENS, response.usage.input_tokens);
                span.record(GEN_AI_USAGE_OUTPUT_TOKENS, response.usage.output_tokens);
                CompletionOutcome {
                    content: response.content,
                    status: TurnStatus::Completed,
                }
            }
            Err(e) => {
                warn!(parent: &span, error = %e, "Completion request failed");
                CompletionOutcome::failed(&e)
            }
        }
    }
}
