//! UseCase layer error definitions.
//!
//! These are the errors that reach clients as ack payloads; their Display
//! strings are user-facing.

use thiserror::Error;

use crate::domain::PresenceError;

/// Errors from the join transition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Another live connection holds the same normalized username in the room
    #[error("Username '{username}' is already in use in room '{room}'")]
    UsernameTaken { username: String, room: String },

    /// The connection already joined a room; there is no room-switch transition
    #[error("Already in a room")]
    AlreadyJoined,
}

impl From<PresenceError> for JoinError {
    fn from(err: PresenceError) -> Self {
        match err {
            PresenceError::UsernameTaken { username, room } => {
                JoinError::UsernameTaken { username, room }
            }
            PresenceError::AlreadyJoined(_) => JoinError::AlreadyJoined,
        }
    }
}

/// Errors from the message pipeline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    /// The sender has no active presence entry
    #[error("Join a room before sending messages")]
    NotInRoom,

    /// The profanity policy flagged the text
    #[error("Profanity is not allowed")]
    ContentRejected,
}
