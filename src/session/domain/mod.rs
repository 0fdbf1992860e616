//! Domain model for session handshakes.
//!
//! Keeps token verification results, owner and fingerprint values, and the
//! persisted session record free of transport and storage concerns.

mod error;
mod identity;
mod ids;
mod record;

pub use error::SessionDomainError;
pub use identity::VerifiedIdentity;
pub use ids::{Fingerprint, OwnerId};
pub use record::{SESSION_TTL_DAYS, SessionRecord, session_ttl};
