//! Repository traits owned by the domain layer.
//!
//! The usecase layer depends on these traits, not on concrete
//! implementations (dependency inversion). In-memory implementations live in
//! the infrastructure layer; the message and identity stores stand in for
//! external subsystems (durable storage, credential issuance).

use async_trait::async_trait;

use super::{
    entity::{Identity, PresenceEntry, StoredMessage},
    error::{PresenceError, StorageError},
    value_object::{ConnectionId, RoomName, Timestamp, Username},
};

/// Process-wide registry of live connection presence.
///
/// Single source of truth for "who is where right now". Entries are created
/// on join and destroyed on disconnect; no other component stores a copy.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Register a presence entry for a connection.
    ///
    /// Atomic with respect to concurrent `add` calls: the normalized
    /// `(room, username)` uniqueness check and the insert happen under one
    /// critical section.
    ///
    /// # Errors
    ///
    /// * `PresenceError::UsernameTaken` - another live connection holds the
    ///   same normalized username in the same room
    /// * `PresenceError::AlreadyJoined` - this connection already has an entry
    async fn add(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> Result<PresenceEntry, PresenceError>;

    /// Remove and return the entry for a connection.
    ///
    /// Idempotent: returns `None` when the connection has no entry, which is
    /// what makes the disconnect path safe to reach twice.
    async fn remove(&self, connection_id: ConnectionId) -> Option<PresenceEntry>;

    /// Look up the entry for a connection without removing it.
    async fn get(&self, connection_id: ConnectionId) -> Option<PresenceEntry>;

    /// Snapshot of the usernames currently in a room, sorted.
    async fn list_room(&self, room: &RoomName) -> Vec<String>;

    /// Snapshot of the connection ids currently in a room.
    async fn connections_in_room(&self, room: &RoomName) -> Vec<ConnectionId>;
}

/// Durable append/query store for messages, keyed by room.
///
/// Single source of truth for "what was said". Treated as an opaque,
/// possibly-failing, possibly-slow dependency; callers must not hold any
/// presence lock while awaiting it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append one message; returns the id assigned by the store.
    async fn append(
        &self,
        room: &RoomName,
        sender_id: &str,
        text: &str,
        created_at: Timestamp,
    ) -> Result<uuid::Uuid, StorageError>;

    /// Up to `limit` most recent messages for a room, ascending by creation time.
    async fn query_recent(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StorageError>;
}

/// Identity lookup against the external credential subsystem.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Resolve a token subject to an identity, if one still exists.
    async fn find_by_id(&self, id: &str) -> Option<Identity>;
}
