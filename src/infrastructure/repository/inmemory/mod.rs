//! In-memory repository implementations.

pub mod identity;
pub mod message;
pub mod presence;

pub use identity::InMemoryIdentityStore;
pub use message::InMemoryMessageStore;
pub use presence::InMemoryPresenceRegistry;
