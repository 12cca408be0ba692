//! UseCase: room join transition.
//!
//! Registers presence, fetches the history replay, and computes the
//! announcement targets. The transport handler is responsible for the
//! delivery order (private history and welcome before the public
//! announcements); this usecase only prepares the pieces.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessageStore, PresenceEntry, PresenceRegistry, RoomName, StoredMessage, Username,
};

use super::error::JoinError;

/// Maximum number of persisted messages replayed to a joining connection.
pub const HISTORY_REPLAY_LIMIT: usize = 100;

/// Everything the transport needs to act on a successful join.
#[derive(Debug)]
pub struct JoinOutcome {
    /// The registered presence entry
    pub entry: PresenceEntry,
    /// Recent persisted messages, oldest first (empty if the query failed)
    pub history: Vec<StoredMessage>,
    /// Roster snapshot taken after the join, sorted
    pub roster: Vec<String>,
    /// Connections already in the room before the join
    pub peers: Vec<ConnectionId>,
    /// Every connection now in the room, joiner included
    pub everyone: Vec<ConnectionId>,
}

/// Room join usecase.
pub struct JoinRoomUseCase {
    registry: Arc<dyn PresenceRegistry>,
    message_store: Arc<dyn MessageStore>,
}

impl JoinRoomUseCase {
    /// Create a new JoinRoomUseCase.
    pub fn new(registry: Arc<dyn PresenceRegistry>, message_store: Arc<dyn MessageStore>) -> Self {
        Self {
            registry,
            message_store,
        }
    }

    /// Execute the join transition for a connection.
    ///
    /// # Errors
    ///
    /// * `JoinError::UsernameTaken` - name conflict in the room
    /// * `JoinError::AlreadyJoined` - the connection already has an entry
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        username: Username,
        room: RoomName,
    ) -> Result<JoinOutcome, JoinError> {
        let entry = self
            .registry
            .add(connection_id, username, room.clone())
            .await?;

        // History query failure degrades to an empty replay; the join itself
        // must not fail because storage is down.
        let history = match self
            .message_store
            .query_recent(&room, HISTORY_REPLAY_LIMIT)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(room = %room, error = %e, "history query failed, replaying empty");
                Vec::new()
            }
        };

        let roster = self.registry.list_room(&room).await;
        let everyone = self.registry.connections_in_room(&room).await;
        let peers = everyone
            .iter()
            .copied()
            .filter(|id| *id != connection_id)
            .collect();

        Ok(JoinOutcome {
            entry,
            history,
            roster,
            peers,
            everyone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StorageError, Timestamp, repository::MockMessageStore};
    use crate::infrastructure::repository::{InMemoryMessageStore, InMemoryPresenceRegistry};

    fn username(raw: &str) -> Username {
        Username::new(raw).unwrap()
    }

    fn room(raw: &str) -> RoomName {
        RoomName::new(raw).unwrap()
    }

    fn create_usecase() -> (
        Arc<InMemoryPresenceRegistry>,
        Arc<InMemoryMessageStore>,
        JoinRoomUseCase,
    ) {
        let registry = Arc::new(InMemoryPresenceRegistry::new());
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = JoinRoomUseCase::new(registry.clone(), store.clone());
        (registry, store, usecase)
    }

    #[tokio::test]
    async fn test_first_join_gets_empty_history_and_own_roster() {
        // given:
        let (_registry, _store, usecase) = create_usecase();
        let conn = ConnectionId::generate();

        // when:
        let result = usecase
            .execute(conn, username("alice"), room("lobby"))
            .await;

        // then:
        let outcome = result.unwrap();
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.roster, vec!["alice"]);
        assert!(outcome.peers.is_empty());
        assert_eq!(outcome.everyone, vec![conn]);
    }

    #[tokio::test]
    async fn test_join_conflict_leaves_roster_unchanged() {
        // given: alice already joined the lobby
        let (registry, _store, usecase) = create_usecase();
        usecase
            .execute(ConnectionId::generate(), username("alice"), room("lobby"))
            .await
            .unwrap();

        // when: a second connection claims the same name
        let result = usecase
            .execute(ConnectionId::generate(), username("alice"), room("lobby"))
            .await;

        // then:
        assert_eq!(
            result.unwrap_err(),
            JoinError::UsernameTaken {
                username: "alice".to_string(),
                room: "lobby".to_string(),
            }
        );
        assert_eq!(registry.list_room(&room("lobby")).await, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_second_join_reports_peers_and_full_roster() {
        // given:
        let (_registry, _store, usecase) = create_usecase();
        let conn_a = ConnectionId::generate();
        usecase
            .execute(conn_a, username("alice"), room("lobby"))
            .await
            .unwrap();

        // when:
        let conn_b = ConnectionId::generate();
        let outcome = usecase
            .execute(conn_b, username("bob"), room("lobby"))
            .await
            .unwrap();

        // then:
        assert_eq!(outcome.roster, vec!["alice", "bob"]);
        assert_eq!(outcome.peers, vec![conn_a]);
        assert_eq!(outcome.everyone.len(), 2);
    }

    #[tokio::test]
    async fn test_join_replays_persisted_history_oldest_first() {
        // given: two messages already persisted for the room
        let (_registry, store, usecase) = create_usecase();
        store
            .append(&room("lobby"), "user-1", "first", Timestamp::new(1000))
            .await
            .unwrap();
        store
            .append(&room("lobby"), "user-2", "second", Timestamp::new(2000))
            .await
            .unwrap();

        // when:
        let outcome = usecase
            .execute(ConnectionId::generate(), username("carol"), room("lobby"))
            .await
            .unwrap();

        // then:
        assert_eq!(outcome.history.len(), 2);
        assert_eq!(outcome.history[0].text, "first");
        assert_eq!(outcome.history[1].text, "second");
    }

    #[tokio::test]
    async fn test_history_query_failure_degrades_to_empty_replay() {
        // given: a store whose query always fails
        let registry = Arc::new(InMemoryPresenceRegistry::new());
        let mut store = MockMessageStore::new();
        store
            .expect_query_recent()
            .returning(|_, _| Err(StorageError::QueryFailed("storage down".to_string())));
        let usecase = JoinRoomUseCase::new(registry.clone(), Arc::new(store));

        // when:
        let result = usecase
            .execute(ConnectionId::generate(), username("alice"), room("lobby"))
            .await;

        // then: the join succeeds with an empty history
        let outcome = result.unwrap();
        assert!(outcome.history.is_empty());
        assert_eq!(outcome.roster, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_join_twice_from_same_connection_fails() {
        // given: the connection already joined a room
        let (_registry, _store, usecase) = create_usecase();
        let conn = ConnectionId::generate();
        usecase
            .execute(conn, username("alice"), room("lobby"))
            .await
            .unwrap();

        // when:
        let result = usecase.execute(conn, username("alice2"), room("games")).await;

        // then:
        assert_eq!(result.unwrap_err(), JoinError::AlreadyJoined);
    }
}
