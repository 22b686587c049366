//! Outbound history window policy.
//!
//! Bounds how much of a conversation is sent with each completion request.
//! The stored log is never truncated; only the outbound payload is.

use finchat_types::llm::Message;

/// How many of the most recent non-system messages to send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryWindow {
    max_messages: Option<usize>,
}

impl HistoryWindow {
    /// Send the whole transcript.
    pub fn unbounded() -> Self {
        Self { max_messages: None }
    }

    /// Send at most the newest `n` messages.
    pub fn last(n: usize) -> Self {
        Self {
            max_messages: Some(n),
        }
    }

    pub fn from_config(max_messages: Option<usize>) -> Self {
        Self { max_messages }
    }

    pub fn max_messages(&self) -> Option<usize> {
        self.max_messages
    }

    /// Split `messages` into `(dropped, kept)`, keeping the newest ones.
    pub fn split<'a>(&self, messages: &'a [Message]) -> (&'a [Message], &'a [Message]) {
        match self.max_messages {
            Some(keep) if messages.len() > keep => messages.split_at(messages.len() - keep),
            _ => (&[], messages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("q{i}"))
                } else {
                    Message::assistant(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn unbounded_keeps_everything() {
        let messages = transcript(7);
        let (dropped, kept) = HistoryWindow::unbounded().split(&messages);
        assert!(dropped.is_empty());
        assert_eq!(kept.len(), 7);
    }

    #[test]
    fn bounded_keeps_newest() {
        let messages = transcript(5);
        let (dropped, kept) = HistoryWindow::last(2).split(&messages);
        assert_eq!(dropped.len(), 3);
        assert_eq!(kept, &messages[3..]);
        assert_eq!(kept[0].content, "a3");
        assert_eq!(kept[1].content, "q4");
    }

    #[test]
    fn bound_larger_than_history_keeps_all() {
        let messages = transcript(2);
        let (dropped, kept) = HistoryWindow::last(10).split(&messages);
        assert!(dropped.is_empty());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn default_is_unbounded() {
        assert_eq!(HistoryWindow::default().max_messages(), None);
    }
}
