//! UseCase: location share pipeline.
//!
//! Same pipeline as chat messages minus the moderation stage: the broadcast
//! text is generated by the server from validated coordinates, so there is
//! nothing to moderate. The persisted form carries the location prefix so
//! downstream consumers can tell it apart from free text.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Coordinates, Identity, MessageStore, PresenceRegistry, RoomName, Timestamp,
    format_location_text, format_map_url,
};
use crate::time::now_timestamp;

use super::error::SendError;

/// A location share ready for fan-out.
#[derive(Debug)]
pub struct OutboundLocation {
    /// Username the sender holds in the room
    pub username: String,
    /// Room the share goes to
    pub room: RoomName,
    /// Map link carried by the broadcast
    pub url: String,
    /// Creation timestamp, also used for the persisted record
    pub timestamp: Timestamp,
    /// Every connection in the room, sender included
    pub targets: Vec<ConnectionId>,
}

/// Location share usecase.
pub struct SendLocationUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_store: Arc<dyn MessageStore>,
}

impl SendLocationUseCase {
    /// Create a new SendLocationUseCase.
    pub fn new(registry: Arc<dyn PresenceRegistry>, message_store: Arc<dyn MessageStore>) -> Self {
        Self {
            registry,
            message_store,
        }
    }

    /// Run the pipeline for one location share.
    ///
    /// # Errors
    ///
    /// * `SendError::NotInRoom` - the sender has no presence entry
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: &Identity,
        coords: Coordinates,
    ) -> Result<OutboundLocation, SendError> {
        let entry = self
            .registry
            .get(connection_id)
            .await
            .ok_or(SendError::NotInRoom)?;

        let timestamp = Timestamp::new(now_timestamp());
        let stored_text = format_location_text(&coords);
        if let Err(e) = self
            .message_store
            .append(&entry.room, &sender.id, &stored_text, timestamp)
            .await
        {
            // Liveness over durability, same as the chat pipeline.
            tracing::warn!(room = %entry.room, error = %e, "location append failed");
        }

        let targets = self.registry.connections_in_room(&entry.room).await;

        Ok(OutboundLocation {
            username: entry.username.into_string(),
            room: entry.room,
            url: format_map_url(&coords),
            timestamp,
            targets,
        })
    }
}
