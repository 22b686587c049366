//! Append-only conversation log for one session.

use finchat_types::llm::{Message, MessageRole};

use super::window::HistoryWindow;

/// Behavioral guidance stored as the first message of every conversation.
///
/// Kept for the record only; outbound requests carry a fresh guidance string
/// built by [`super::guidance::SystemGuidance`] instead.
pub const SEED_SYSTEM_PROMPT: &str = "You are a concise, friendly finance assistant for a \
CPA/Advisory firm. Answer questions clearly (aim for 5-8 sentences max), ask 1-2 clarifying \
questions when needed, and never provide legal/tax advice. Stick to educational guidance only.";

/// Ordered, append-only message log.
///
/// Always starts with exactly one system message. Entries are never
/// removed or edited.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::system(SEED_SYSTEM_PROMPT)],
        }
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Full log including the seed system message.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the seed message is present from construction.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Non-system messages in order: what a user sees.
    pub fn visible(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
    }

    /// Non-system messages to send with the next request, limited by `window`.
    pub fn outbound_history(&self, window: &HistoryWindow) -> Vec<Message> {
        let visible: Vec<Message> = self.visible().cloned().collect();
        let (_, kept) = window.split(&visible);
        kept.to_vec()
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
