//! In-memory message store.
//!
//! Stand-in for the external persistence gateway: a per-room `Vec` of
//! messages under a Mutex. Append order is creation order, so `query_recent`
//! can slice the tail and return it ascending without sorting.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageStore, RoomName, StorageError, StoredMessage, Timestamp};

/// HashMap-backed implementation of the domain `MessageStore` trait.
#[derive(Default)]
pub struct InMemoryMessageStore {
    rooms: Mutex<HashMap<String, Vec<StoredMessage>>>,
}

impl InMemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(
        &self,
        room: &RoomName,
        sender_id: &str,
        text: &str,
        created_at: Timestamp,
    ) -> Result<uuid::Uuid, StorageError> {
        let id = uuid::Uuid::new_v4();
        let message = StoredMessage {
            id,
            sender_id: sender_id.to_string(),
            room: room.as_str().to_string(),
            text: text.to_string(),
            created_at,
        };

        let mut rooms = self.rooms.lock().await;
        rooms.entry(room.as_str().to_string()).or_default().push(message);
        Ok(id)
    }

    async fn query_recent(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StorageError> {
        let rooms = self.rooms.lock().await;
        let messages = match rooms.get(room.as_str()) {
            Some(messages) => messages,
            None => return Ok(Vec::new()),
        };

        let start = messages.len().saturating_sub(limit);
        Ok(messages[start..].to_vec())
    }
}
