//! Interactive terminal chat for finchat.
//!
//! Prompt loop with a thinking spinner, markdown-rendered replies, a
//! suggested-services footer and slash commands. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
