//! WebSocket message DTOs for the chat relay.
//!
//! Client events arrive as one tagged enum; server events are flat structs
//! carrying a `MessageType` tag, serialized individually.

use serde::{Deserialize, Serialize};

/// Events a client may send after the connection is established.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Claim a username and enter a room
    Join { username: String, room: String },
    /// Send a chat message to the current room
    SendMessage { text: String },
    /// Share coordinates with the current room
    SendLocation { latitude: f64, longitude: f64 },
}

/// Message type enum for server-to-client events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    Ack,
    Message,
    LocationMessage,
    RoomHistory,
    RoomData,
}

/// Acknowledgment for a client event; `error` is private to the originator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    pub r#type: MessageType,
    /// Which client event this acknowledges ("join", "send-message", ...)
    pub request: String,
    pub error: Option<String>,
}

/// Chat text delivered to a room; announcements use the admin username
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatBroadcastMessage {
    pub r#type: MessageType,
    pub username: String,
    pub text: String,
    /// Unix timestamp (milliseconds since epoch)
    pub timestamp: i64,
}

/// Location share delivered to a room as a map link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationBroadcastMessage {
    pub r#type: MessageType,
    pub username: String,
    pub url: String,
    pub timestamp: i64,
}

/// One persisted message inside a history replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Identity id of the sender at the time the message was stored
    pub sender: String,
    pub text: String,
    pub timestamp: i64,
}

/// One-time history replay sent privately to a joining connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomHistoryMessage {
    pub r#type: MessageType,
    pub messages: Vec<HistoryEntry>,
}

/// Roster snapshot broadcast to every connection in the room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDataMessage {
    pub r#type: MessageType,
    pub room: String,
    pub users: Vec<String>,
}
