//! Persisted session record.

use super::{Fingerprint, OwnerId};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Lifetime of a session, in days, for both the cookies and the record.
pub const SESSION_TTL_DAYS: i64 = 3;

/// Returns the session lifetime as a [`TimeDelta`].
#[must_use]
pub fn session_ttl() -> TimeDelta {
    TimeDelta::days(SESSION_TTL_DAYS)
}

/// Device binding stored for an owner after a successful handshake.
///
/// At most one record exists per owner; a new handshake replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    owner_id: OwnerId,
    fingerprint: Fingerprint,
    created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a record stamped with the current clock time.
    #[must_use]
    pub fn new(owner_id: OwnerId, fingerprint: Fingerprint, clock: &impl Clock) -> Self {
        Self::from_persisted(owner_id, fingerprint, clock.utc())
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        owner_id: OwnerId,
        fingerprint: Fingerprint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id,
            fingerprint,
            created_at,
        }
    }

    /// Returns the owner id the record is keyed by.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the bound device fingerprint.
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Returns the handshake timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the instant after which the record no longer admits anyone.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + session_ttl()
    }

    /// Returns whether `fingerprint` may resume this session at `now`.
    ///
    /// Both the fingerprint and the age must check out; the record is still
    /// valid at exactly three days old.
    #[must_use]
    pub fn admits(&self, fingerprint: &Fingerprint, now: DateTime<Utc>) -> bool {
        self.fingerprint == *fingerprint && now <= self.expires_at()
    }
}
