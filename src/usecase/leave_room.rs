//! UseCase: leave transition.
//!
//! Triggered by transport close or explicit disconnect. Safe to reach twice
//! for the same connection: the registry removal is idempotent, so the
//! second call yields `None` and no announcement is produced.

use std::sync::Arc;

use crate::domain::{ConnectionId, PresenceEntry, PresenceRegistry};

/// Announcement material produced by a leave that removed an entry.
#[derive(Debug)]
pub struct LeaveOutcome {
    /// The removed presence entry
    pub entry: PresenceEntry,
    /// Roster snapshot of the now-reduced room, sorted
    pub roster: Vec<String>,
    /// Connections remaining in the room
    pub remaining: Vec<ConnectionId>,
}

/// Leave usecase.
pub struct LeaveRoomUseCase {
    registry: Arc<dyn PresenceRegistry>,
}

impl LeaveRoomUseCase {
    /// Create a new LeaveRoomUseCase.
    pub fn new(registry: Arc<dyn PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Execute the leave transition.
    ///
    /// Returns `None` when the connection had no presence entry (disconnect
    /// before join, or a second pass over the leave path).
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<LeaveOutcome> {
        let entry = self.registry.remove(connection_id).await?;
        let roster = self.registry.list_room(&entry.room).await;
        let remaining = self.registry.connections_in_room(&entry.room).await;

        Some(LeaveOutcome {
            entry,
            roster,
            remaining,
        })
    }
}
