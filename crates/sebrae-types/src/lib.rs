//! Shared domain types for the Sebrae assistant terminal client.
//!
//! This crate contains the data shapes exchanged with the Sebrae assistant
//! HTTP API and the in-memory transcript model used by the chat loop.
//!
//! Wire-facing structs keep the server's Portuguese field names; the API
//! contract is fixed on the server side.
//!
//! Zero infrastructure dependencies, only serde and chrono.

pub mod chat;
pub mod document;
pub mod knowledge;
pub mod user;
