//! Repository implementations.
//!
//! Concrete implementations of the repository traits defined by the domain
//! layer. The usecase layer depends on the traits, not on these types.

pub mod inmemory;

pub use inmemory::{InMemoryIdentityStore, InMemoryMessageStore, InMemoryPresenceRegistry};
