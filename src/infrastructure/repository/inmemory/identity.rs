//! In-memory identity store.
//!
//! Stand-in for the external credential subsystem. The relay only ever reads
//! from it; accounts are created elsewhere (registration is out of scope).

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Identity, IdentityStore};

/// HashMap-backed implementation of the domain `IdentityStore` trait.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    identities: Mutex<HashMap<String, Identity>>,
}

impl InMemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identity, replacing any previous one with the same id.
    pub async fn insert(&self, identity: Identity) {
        let mut identities = self.identities.lock().await;
        identities.insert(identity.id.clone(), identity);
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_id(&self, id: &str) -> Option<Identity> {
        let identities = self.identities.lock().await;
        identities.get(id).cloned()
    }
}
