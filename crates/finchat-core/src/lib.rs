//! Business logic for finchat.
//!
//! This crate holds the matching heuristic, conversation state, session
//! store, catalog cache and completion orchestration, plus the "ports"
//! (`CatalogSource`, `LlmProvider`, `SecretProvider`) that the
//! infrastructure layer implements. It depends on `finchat-types` and the
//! span attribute names in `finchat-observe`, never on `finchat-infra` or
//! any IO crate.

pub mod catalog;
pub mod chat;
pub mod llm;
pub mod matcher;
pub mod secret;
