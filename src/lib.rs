//! Room-based chat relay.
//!
//! Clients establish an authenticated WebSocket connection, join a named
//! room, exchange text and location messages, and observe membership changes
//! live. Presence is in-memory and rebuilt empty on restart; messages are
//! written through a persistence gateway whose failures never block the live
//! chat.

pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod moderation;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{app, run_server, state::AppState};
