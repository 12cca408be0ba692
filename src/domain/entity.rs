//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{ConnectionId, Coordinates, RoomName, Timestamp, Username};

/// Prefix marking a persisted message as a location share.
///
/// Location shares are stored as opaque text like every other message; this
/// prefix is the only thing that distinguishes them downstream.
pub const LOCATION_PREFIX: &str = "[location] ";

/// Username used for server-generated announcements (welcome, joined, left).
pub const SYSTEM_USERNAME: &str = "admin";

/// An authenticated identity, resolved once per connection.
///
/// Owned by the external credential subsystem; the relay only references it
/// and never mutates it for the lifetime of the connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier in the credential subsystem
    pub id: String,
    /// Display name shown alongside persisted messages
    pub display_name: String,
    /// Contact address, unused by the relay itself
    pub email: String,
}

impl Identity {
    /// Create a new Identity.
    pub fn new(id: String, display_name: String, email: String) -> Self {
        Self {
            id,
            display_name,
            email,
        }
    }
}

/// The live fact that a connection currently claims a username in a room.
///
/// Created on a successful join, destroyed on disconnect or leave, and owned
/// exclusively by the presence registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    /// The connection this entry belongs to
    pub connection_id: ConnectionId,
    /// Normalized username claimed in the room
    pub username: Username,
    /// Normalized room the connection joined
    pub room: RoomName,
}

impl PresenceEntry {
    /// Create a new PresenceEntry.
    pub fn new(connection_id: ConnectionId, username: Username, room: RoomName) -> Self {
        Self {
            connection_id,
            username,
            room,
        }
    }
}

/// Distinguishes the two text shapes a stored message can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Free-form chat text
    Chat,
    /// A formatted map-link string produced by a location share
    Location,
}

/// A durably stored chat message.
///
/// Immutable once written; owned by the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Identifier assigned by the persistence gateway
    pub id: uuid::Uuid,
    /// Identity id of the sender
    pub sender_id: String,
    /// Normalized room the message was sent to
    pub room: String,
    /// Message text (chat, or a prefixed location string)
    pub text: String,
    /// Creation timestamp, milliseconds UTC
    pub created_at: Timestamp,
}

impl StoredMessage {
    /// Classify the message by its text shape.
    pub fn kind(&self) -> MessageKind {
        if self.text.starts_with(LOCATION_PREFIX) {
            MessageKind::Location
        } else {
            MessageKind::Chat
        }
    }
}

/// Format a location share as a map link.
///
/// The format is deterministic so downstream consumers can rely on it.
pub fn format_map_url(coords: &Coordinates) -> String {
    format!(
        "https://www.google.com/maps?q={},{}",
        coords.latitude(),
        coords.longitude()
    )
}

/// The persisted text form of a location share: map link plus kind prefix.
pub fn format_location_text(coords: &Coordinates) -> String {
    format!("{}{}", LOCATION_PREFIX, format_map_url(coords))
}
