//! Server state and connection management.

use serde::Deserialize;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, mpsc};

use crate::domain::{ConnectionId, Identity, IdentityStore, MessageStore, PresenceRegistry};
use crate::moderation::ProfanityPolicy;

/// Query parameters for WebSocket connection establishment
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Bearer token; absence or invalidity closes the connection before upgrade
    pub token: Option<String>,
}

/// Live connection information
pub struct ClientInfo {
    /// Channel feeding this connection's outbound socket task
    pub sender: mpsc::UnboundedSender<String>,
    /// Identity resolved at authentication time, immutable for the connection
    pub identity: Identity,
}

/// Shared application state
pub struct AppState {
    /// Presence registry (who is where right now)
    pub registry: Arc<dyn PresenceRegistry>,
    /// Persistence gateway (what was said)
    pub messages: Arc<dyn MessageStore>,
    /// Identity lookup for the authentication gate
    pub identities: Arc<dyn IdentityStore>,
    /// HS256 secret shared with the credential subsystem
    pub jwt_secret: String,
    /// Profanity policy applied by the message pipeline
    pub moderation: ProfanityPolicy,
    /// Outbound channels for every live connection
    pub connections: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
}

impl AppState {
    /// Assemble the application state from its injected components.
    pub fn new(
        registry: Arc<dyn PresenceRegistry>,
        messages: Arc<dyn MessageStore>,
        identities: Arc<dyn IdentityStore>,
        jwt_secret: String,
        moderation: ProfanityPolicy,
    ) -> Self {
        Self {
            registry,
            messages,
            identities,
            jwt_secret,
            moderation,
            connections: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
