//! Conversation state, session bookkeeping, and turn orchestration.

pub mod conversation;
pub mod guidance;
pub mod service;
pub mod session_store;
pub mod window;
