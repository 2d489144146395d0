//! Interactive chat with the consultor virtual.
//!
//! This module implements the full chat experience: welcome banner,
//! seeded greeting, input loop, the typed-reveal renderer for assistant
//! replies, slash commands, and the in-memory transcript. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod markdown;
pub mod reply;
pub mod terminal;
pub mod typewriter;
