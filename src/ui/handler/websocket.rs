//! WebSocket connection handler.
//!
//! Authentication happens before the upgrade; everything after it is the
//! room session. All server-to-client traffic for a connection flows
//! through its mpsc channel, so enqueue order is delivery order: the
//! private history replay and welcome are queued before any public
//! announcement for the same join.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Coordinates, Identity, MessageText, RoomName, SYSTEM_USERNAME, Username},
    infrastructure::dto::websocket::{
        AckMessage, ChatBroadcastMessage, ClientEvent, HistoryEntry, LocationBroadcastMessage,
        MessageType, RoomDataMessage, RoomHistoryMessage,
    },
    time::now_timestamp,
    ui::state::{AppState, ClientInfo, ConnectQuery},
    usecase::{
        AuthenticateConnectionUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendLocationUseCase,
        SendMessageUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let auth = AuthenticateConnectionUseCase::new(&state.jwt_secret, state.identities.clone());

    match auth.execute(query.token.as_deref()).await {
        Ok(identity) => {
            tracing::info!("connection authenticated as '{}'", identity.id);
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, identity)))
        }
        Err(e) => {
            tracing::warn!("rejected connection attempt: {e}");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, identity: Identity) {
    let connection_id = ConnectionId::generate();
    let (mut socket_sender, mut socket_receiver) = socket.split();

    // Channel feeding this connection's outbound task
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    {
        let mut connections = state.connections.lock().await;
        connections.insert(
            connection_id,
            ClientInfo {
                sender: tx,
                identity: identity.clone(),
            },
        );
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if socket_sender
                .send(Message::Text(payload.into()))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let recv_identity = identity.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = socket_receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!("websocket error on {connection_id}: {e}");
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    handle_client_event(&recv_state, connection_id, &recv_identity, &text).await;
                }
                Message::Close(_) => {
                    tracing::info!("connection {connection_id} requested close");
                    break;
                }
                // Ping/pong is handled by the protocol layer
                _ => {}
            }
        }
    });

    // If either task completes, the connection is done
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Leave runs exactly once per connection; the registry removal is
    // idempotent, so nothing happens if the connection never joined.
    let leave_usecase = LeaveRoomUseCase::new(state.registry.clone());
    if let Some(outcome) = leave_usecase.execute(connection_id).await {
        tracing::info!(
            "'{}' left room '{}'",
            outcome.entry.username,
            outcome.entry.room
        );

        let left = ChatBroadcastMessage {
            r#type: MessageType::Message,
            username: SYSTEM_USERNAME.to_string(),
            text: format!("{} has left", outcome.entry.username),
            timestamp: now_timestamp(),
        };
        send_to(&state, &outcome.remaining, &serde_json::to_string(&left).unwrap()).await;

        let roster = RoomDataMessage {
            r#type: MessageType::RoomData,
            room: outcome.entry.room.into_string(),
            users: outcome.roster,
        };
        send_to(&state, &outcome.remaining, &serde_json::to_string(&roster).unwrap()).await;
    }

    let mut connections = state.connections.lock().await;
    connections.remove(&connection_id);
}

/// Parse and dispatch one inbound frame.
async fn handle_client_event(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    identity: &Identity,
    text: &str,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("unparseable frame from {connection_id}: {e}");
            ack(state, connection_id, "unknown", Some("unrecognized event".to_string())).await;
            return;
        }
    };

    match event {
        ClientEvent::Join { username, room } => {
            handle_join(state, connection_id, &username, &room).await;
        }
        ClientEvent::SendMessage { text } => {
            handle_send_message(state, connection_id, identity, text).await;
        }
        ClientEvent::SendLocation {
            latitude,
            longitude,
        } => {
            handle_send_location(state, connection_id, identity, latitude, longitude).await;
        }
    }
}

async fn handle_join(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    raw_username: &str,
    raw_room: &str,
) {
    let username = match Username::new(raw_username) {
        Ok(username) => username,
        Err(e) => {
            ack(state, connection_id, "join", Some(e.to_string())).await;
            return;
        }
    };
    let room = match RoomName::new(raw_room) {
        Ok(room) => room,
        Err(e) => {
            ack(state, connection_id, "join", Some(e.to_string())).await;
            return;
        }
    };

    let usecase = JoinRoomUseCase::new(state.registry.clone(), state.messages.clone());
    let outcome = match usecase.execute(connection_id, username, room).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("join rejected for {connection_id}: {e}");
            ack(state, connection_id, "join", Some(e.to_string())).await;
            return;
        }
    };
    tracing::info!(
        "'{}' joined room '{}'",
        outcome.entry.username,
        outcome.entry.room
    );

    // Private sequence to the joiner: ack, history replay, welcome.
    ack(state, connection_id, "join", None).await;

    let history = RoomHistoryMessage {
        r#type: MessageType::RoomHistory,
        messages: outcome
            .history
            .iter()
            .map(|message| HistoryEntry {
                sender: message.sender_id.clone(),
                text: message.text.clone(),
                timestamp: message.created_at.value(),
            })
            .collect(),
    };
    send_to(state, &[connection_id], &serde_json::to_string(&history).unwrap()).await;

    let welcome = ChatBroadcastMessage {
        r#type: MessageType::Message,
        username: SYSTEM_USERNAME.to_string(),
        text: "Welcome!".to_string(),
        timestamp: now_timestamp(),
    };
    send_to(state, &[connection_id], &serde_json::to_string(&welcome).unwrap()).await;

    // Public sequence: arrival announcement to peers, roster to everyone.
    let joined = ChatBroadcastMessage {
        r#type: MessageType::Message,
        username: SYSTEM_USERNAME.to_string(),
        text: format!("{} has joined!", outcome.entry.username),
        timestamp: now_timestamp(),
    };
    send_to(state, &outcome.peers, &serde_json::to_string(&joined).unwrap()).await;

    let roster = RoomDataMessage {
        r#type: MessageType::RoomData,
        room: outcome.entry.room.into_string(),
        users: outcome.roster,
    };
    send_to(state, &outcome.everyone, &serde_json::to_string(&roster).unwrap()).await;
}

async fn handle_send_message(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    identity: &Identity,
    raw_text: String,
) {
    let text = match MessageText::new(raw_text) {
        Ok(text) => text,
        Err(e) => {
            ack(state, connection_id, "send-message", Some(e.to_string())).await;
            return;
        }
    };

    let usecase = SendMessageUseCase::new(
        state.registry.clone(),
        state.messages.clone(),
        state.moderation.clone(),
    );
    match usecase.execute(connection_id, identity, text).await {
        Ok(outbound) => {
            let broadcast = ChatBroadcastMessage {
                r#type: MessageType::Message,
                username: outbound.username,
                text: outbound.text,
                timestamp: outbound.timestamp.value(),
            };
            send_to(
                state,
                &outbound.targets,
                &serde_json::to_string(&broadcast).unwrap(),
            )
            .await;
            ack(state, connection_id, "send-message", None).await;
        }
        Err(e) => {
            ack(state, connection_id, "send-message", Some(e.to_string())).await;
        }
    }
}

async fn handle_send_location(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    identity: &Identity,
    latitude: f64,
    longitude: f64,
) {
    let coords = match Coordinates::new(latitude, longitude) {
        Ok(coords) => coords,
        Err(e) => {
            ack(state, connection_id, "send-location", Some(e.to_string())).await;
            return;
        }
    };

    let usecase = SendLocationUseCase::new(state.registry.clone(), state.messages.clone());
    match usecase.execute(connection_id, identity, coords).await {
        Ok(outbound) => {
            let broadcast = LocationBroadcastMessage {
                r#type: MessageType::LocationMessage,
                username: outbound.username,
                url: outbound.url,
                timestamp: outbound.timestamp.value(),
            };
            send_to(
                state,
                &outbound.targets,
                &serde_json::to_string(&broadcast).unwrap(),
            )
            .await;
            ack(state, connection_id, "send-location", None).await;
        }
        Err(e) => {
            ack(state, connection_id, "send-location", Some(e.to_string())).await;
        }
    }
}

/// Acknowledge a client event; errors stay private to the originator.
async fn ack(
    state: &Arc<AppState>,
    connection_id: ConnectionId,
    request: &str,
    error: Option<String>,
) {
    let ack = AckMessage {
        r#type: MessageType::Ack,
        request: request.to_string(),
        error,
    };
    send_to(state, &[connection_id], &serde_json::to_string(&ack).unwrap()).await;
}

/// Queue a payload on the outbound channel of each target connection.
async fn send_to(state: &Arc<AppState>, targets: &[ConnectionId], payload: &str) {
    let connections = state.connections.lock().await;
    for target in targets {
        if let Some(info) = connections.get(target)
            && info.sender.send(payload.to_string()).is_err()
        {
            // Target is tearing down; its leave path will clean up.
            tracing::debug!("failed to queue payload for connection {target}");
        }
    }
}
