//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Field names used on the `gen_ai.complete` span. Request fields are set
//! when the span opens; response fields are recorded by name once the
//! provider answers, so the strings here must match the span declaration.

/// The GenAI system (provider) handling the request (e.g., "openai").
pub const GEN_AI_SYSTEM: &str = "gen_ai.system";

/// The model ID requested (e.g., "gpt-4o-mini").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The finish reason for the response (e.g., "end_turn", "max_tokens").
pub const GEN_AI_RESPONSE_FINISH_REASONS: &str = "gen_ai.response.finish_reasons";

/// The unique response ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

/// Provider name values.
pub const PROVIDER_OPENAI: &str = "openai";
pub const PROVIDER_GEMINI: &str = "gemini";
pub const PROVIDER_MISTRAL: &str = "mistral";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_names_share_namespace() {
        for name in [
            GEN_AI_SYSTEM,
            GEN_AI_REQUEST_MODEL,
            GEN_AI_REQUEST_MAX_TOKENS,
            GEN_AI_USAGE_INPUT_TOKENS,
            GEN_AI_USAGE_OUTPUT_TOKENS,
            GEN_AI_RESPONSE_FINISH_REASONS,
            GEN_AI_RESPONSE_ID,
        ] {
            assert!(name.starts_with("gen_ai."), "{name}");
        }
    }
}
