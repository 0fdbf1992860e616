//! Port contracts for session handshakes.
//!
//! Ports define infrastructure-agnostic interfaces used by session services.

pub mod identity;
pub mod store;

pub use identity::{IdentityError, IdentityProvider, IdentityResult};
pub use store::{SessionStore, SessionStoreError, SessionStoreResult};
