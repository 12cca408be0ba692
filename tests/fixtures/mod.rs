//! Test server harness shared by the integration suites.
#![allow(dead_code)]

use std::sync::Arc;

use chat_relay::{
    AppState, app,
    domain::Identity,
    infrastructure::repository::{
        InMemoryIdentityStore, InMemoryMessageStore, InMemoryPresenceRegistry,
    },
    moderation::ProfanityPolicy,
};

/// HS256 secret shared between the fixture server and test-minted tokens.
pub const TEST_SECRET: &str = "integration-test-secret";

/// A running relay server bound to a fixed localhost port.
///
/// Each test uses its own port so the suites can run in parallel. Handles to
/// the in-memory stores are kept so tests can seed identities and messages
/// and inspect what was persisted.
pub struct TestServer {
    port: u16,
    pub identities: Arc<InMemoryIdentityStore>,
    pub messages: Arc<InMemoryMessageStore>,
}

impl TestServer {
    /// Bind the listener and serve in a background task.
    ///
    /// The listener is bound before this returns, so clients can connect
    /// immediately.
    pub async fn start(port: u16) -> Self {
        let identities = Arc::new(InMemoryIdentityStore::new());
        let messages = Arc::new(InMemoryMessageStore::new());
        let state = Arc::new(AppState::new(
            Arc::new(InMemoryPresenceRegistry::new()),
            messages.clone(),
            identities.clone(),
            TEST_SECRET.to_string(),
            ProfanityPolicy::default(),
        ));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("failed to bind test listener");
        tokio::spawn(async move {
            axum::serve(listener, app(state))
                .await
                .expect("test server crashed");
        });

        Self {
            port,
            identities,
            messages,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self, token: &str) -> String {
        format!("ws://127.0.0.1:{}/ws?token={}", self.port, token)
    }

    pub fn ws_url_without_token(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    /// Seed an identity the authentication gate can resolve.
    pub async fn register_identity(&self, id: &str, display_name: &str) {
        self.identities
            .insert(Identity::new(
                id.to_string(),
                display_name.to_string(),
                format!("{id}@example.com"),
            ))
            .await;
    }
}
