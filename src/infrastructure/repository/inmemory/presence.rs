//! In-memory presence registry.
//!
//! The registry is the only state mutated from concurrent connection
//! handlers, so every operation runs under one `tokio::sync::Mutex`. The
//! lock covers map operations only and is never held across store awaits.
//! Presence is rebuilt empty on process restart; nothing here is persisted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, PresenceEntry, PresenceError, PresenceRegistry, RoomName, Username,
};

/// HashMap-backed implementation of the domain `PresenceRegistry` trait.
///
/// One entry per connection; the `(room, username)` uniqueness invariant is
/// enforced inside `add` under the lock.
#[derive(Default)]
pub struct InMemoryPresenceRegistry {
    entries: Mutex<HashMap<ConnectionId, PresenceEntry>>,
}

impl InMemoryPresenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresenceRegistry for InMemoryPresenceRegistry {
    async fn add(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> Result<PresenceEntry, PresenceError> {
        let mut entries = self.entries.lock().await;

        if entries.contains_key(&connection_id) {
            return Err(PresenceError::AlreadyJoined(connection_id));
        }

        // Username and room are already normalized by their constructors,
        // so equality here is equality of normalized values.
        let taken = entries
            .values()
            .any(|entry| entry.room == room && entry.username == username);
        if taken {
            return Err(PresenceError::UsernameTaken {
                username: username.into_string(),
                room: room.into_string(),
            });
        }

        let entry = PresenceEntry::new(connection_id, username, room);
        entries.insert(connection_id, entry.clone());
        Ok(entry)
    }

    async fn remove(&self, connection_id: ConnectionId) -> Option<PresenceEntry> {
        let mut entries = self.entries.lock().await;
        entries.remove(&connection_id)
    }

    async fn get(&self, connection_id: ConnectionId) -> Option<PresenceEntry> {
        let entries = self.entries.lock().await;
        entries.get(&connection_id).cloned()
    }

    async fn list_room(&self, room: &RoomName) -> Vec<String> {
        let entries = self.entries.lock().await;
        let mut usernames: Vec<String> = entries
            .values()
            .filter(|entry| &entry.room == room)
            .map(|entry| entry.username.as_str().to_string())
            .collect();

        // Sorted so roster snapshots are deterministic for clients
        usernames.sort();
        usernames
    }

    async fn connections_in_room(&self, room: &RoomName) -> Vec<ConnectionId> {
        let entries = self.entries.lock().await;
        entries
            .values()
            .filter(|entry| &entry.room == room)
            .map(|entry| entry.connection_id)
            .collect()
    }
}
