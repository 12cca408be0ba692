//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{
    Identity, LOCATION_PREFIX, MessageKind, PresenceEntry, StoredMessage, SYSTEM_USERNAME,
    format_location_text, format_map_url,
};
pub use error::{AuthError, PresenceError, StorageError, ValueObjectError};
pub use repository::{IdentityStore, MessageStore, PresenceRegistry};
pub use value_object::{
    ConnectionId, Coordinates, MessageText, RoomName, Timestamp, Username, normalize,
};
