//! Async readline input for the chat loop.
//!
//! Wraps `rustyline_async::Readline` so the loop only sees submitted lines,
//! EOF (Ctrl+D) and interrupts (Ctrl+C). Submitted lines are added to the
//! in-memory history so the arrow keys recall them.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the user did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// A submitted line, trimmed. May be empty.
    Line(String),
    /// Ctrl+D, or the terminal went away.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

impl From<ReadlineEvent> for InputEvent {
    fn from(event: ReadlineEvent) -> Self {
        match event {
            ReadlineEvent::Line(line) => InputEvent::Line(line.trim().to_string()),
            ReadlineEvent::Eof => InputEvent::Eof,
            ReadlineEvent::Interrupted => InputEvent::Interrupted,
        }
    }
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Returns the input handler and a `SharedWriter` for printing without
    /// clobbering the prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(event) => {
                let event = InputEvent::from(event);
                if let InputEvent::Line(ref line) = event {
                    if !line.is_empty() {
                        self.rl.add_history_entry(line.clone());
                    }
                }
                event
            }
            Err(e) => {
                tracing::debug!(error = %e, "Readline failed, treating as EOF");
                InputEvent::Eof
            }
        }
    }

    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before the process prints its last lines.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
