//! Infrastructure layer for finchat.
//!
//! Contains implementations of the ports defined in `finchat-core`: the
//! YAML service catalog, secret providers (secrets file, environment), and
//! the OpenAI-compatible completion provider. Also owns configuration
//! loading from the data directory.

pub mod catalog;
pub mod config;
pub mod llm;
pub mod secret;
