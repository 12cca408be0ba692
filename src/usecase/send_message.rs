//! UseCase: chat message pipeline.
//!
//! Order per message: presence lookup, moderation, persistence handoff,
//! then fan-out. Persistence failure is logged and does not gate the
//! broadcast: the live chat stays responsive while durable storage is
//! degraded, at the cost of a possible gap in history.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Identity, MessageStore, MessageText, PresenceRegistry, RoomName, Timestamp,
};
use crate::moderation::ProfanityPolicy;
use crate::time::now_timestamp;

use super::error::SendError;

/// A chat message ready for fan-out.
#[derive(Debug)]
pub struct OutboundChat {
    /// Username the sender holds in the room
    pub username: String,
    /// Room the message goes to
    pub room: RoomName,
    /// Message text
    pub text: String,
    /// Creation timestamp, also used for the persisted record
    pub timestamp: Timestamp,
    /// Every connection in the room, sender included
    pub targets: Vec<ConnectionId>,
}

/// Chat message usecase.
pub struct SendMessageUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_store: Arc<dyn MessageStore>,
    policy: ProfanityPolicy,
}

impl SendMessageUseCase {
    /// Create a new SendMessageUseCase.
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        message_store: Arc<dyn MessageStore>,
        policy: ProfanityPolicy,
    ) -> Self {
        Self {
            registry,
            message_store,
            policy,
        }
    }

    /// Run the pipeline for one client-submitted message.
    ///
    /// # Errors
    ///
    /// * `SendError::NotInRoom` - the sender has no presence entry
    /// * `SendError::ContentRejected` - the profanity policy flagged the text;
    ///   the message is neither persisted nor broadcast
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: &Identity,
        text: MessageText,
    ) -> Result<OutboundChat, SendError> {
        let entry = self
            .registry
            .get(connection_id)
            .await
            .ok_or(SendError::NotInRoom)?;

        if self.policy.is_profane(text.as_str()) {
            return Err(SendError::ContentRejected);
        }

        let timestamp = Timestamp::new(now_timestamp());
        if let Err(e) = self
            .message_store
            .append(&entry.room, &sender.id, text.as_str(), timestamp)
            .await
        {
            // Liveness over durability: the broadcast still goes out.
            tracing::warn!(room = %entry.room, error = %e, "message append failed");
        }

        let targets = self.registry.connections_in_room(&entry.room).await;

        Ok(OutboundChat {
            username: entry.username.into_string(),
            room: entry.room,
            text: text.into_string(),
            timestamp,
            targets,
        })
    }
}
