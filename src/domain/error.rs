//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::ConnectionId;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("Message text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("Message text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Latitude out of the ±90 degree range
    #[error("Latitude must be between -90 and 90 degrees (got {0})")]
    LatitudeOutOfRange(f64),

    /// Longitude out of the ±180 degree range
    #[error("Longitude must be between -180 and 180 degrees (got {0})")]
    LongitudeOutOfRange(f64),
}

/// Errors returned by the presence registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// The normalized (room, username) pair is already claimed
    #[error("Username '{username}' is already in use in room '{room}'")]
    UsernameTaken { username: String, room: String },

    /// The connection already holds a presence entry
    #[error("Connection {0} is already in a room")]
    AlreadyJoined(ConnectionId),
}

/// Errors returned by the authentication gate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was supplied with the connection attempt
    #[error("Authentication token is missing")]
    MissingToken,

    /// Signature or expiry validation failed
    #[error("Authentication token is invalid")]
    InvalidToken,

    /// Token was valid but the subject no longer resolves to an identity
    #[error("No identity found for token subject '{0}'")]
    UnknownSubject(String),
}

/// Errors returned by the persistence gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Append failed; the message was not durably recorded
    #[error("Failed to append message: {0}")]
    AppendFailed(String),

    /// Query failed; no history is available
    #[error("Failed to query messages: {0}")]
    QueryFailed(String),
}
