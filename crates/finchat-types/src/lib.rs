//! Shared domain types for finchat.
//!
//! This crate contains the core domain types used across the workspace:
//! service records, conversation messages, firm settings, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod service;
