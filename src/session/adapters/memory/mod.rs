//! In-memory session adapters for tests and local runs.

mod identity;
mod store;

pub use identity::StaticIdentityProvider;
pub use store::InMemorySessionStore;
