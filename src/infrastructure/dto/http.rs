//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::domain::StoredMessage;

/// Persisted message as returned by the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub sender_id: String,
    pub room: String,
    pub text: String,
    /// Unix timestamp (milliseconds since epoch)
    pub created_at: i64,
}

impl From<StoredMessage> for MessageDto {
    fn from(message: StoredMessage) -> Self {
        Self {
            id: message.id.to_string(),
            sender_id: message.sender_id,
            room: message.room,
            text: message.text,
            created_at: message.created_at.value(),
        }
    }
}
