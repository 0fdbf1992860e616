//! Validated scalar types for session owners and devices.

use super::SessionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum owner id length, matching the `VARCHAR(128)` key column.
const MAX_OWNER_ID_LENGTH: usize = 128;

/// Maximum fingerprint length accepted from clients.
const MAX_FINGERPRINT_LENGTH: usize = 512;

/// Identity-provider subject id that owns a session.
///
/// This is the canonical session key: both handshake variants write the
/// record under it and every read path looks it up by the `uid` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates a validated owner id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyOwnerId`] when the value is blank,
    /// or [`SessionDomainError::InvalidOwnerId`] when it contains whitespace
    /// or exceeds 128 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(SessionDomainError::EmptyOwnerId);
        }

        if normalized.len() > MAX_OWNER_ID_LENGTH || normalized.chars().any(char::is_whitespace) {
            return Err(SessionDomainError::InvalidOwnerId(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the owner id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque client-supplied device identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Creates a validated fingerprint.
    ///
    /// The value is compared verbatim, only surrounding whitespace is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyFingerprint`] when the value is
    /// blank, or [`SessionDomainError::FingerprintTooLong`] when it exceeds
    /// 512 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(SessionDomainError::EmptyFingerprint);
        }

        if normalized.len() > MAX_FINGERPRINT_LENGTH {
            return Err(SessionDomainError::FingerprintTooLong(
                MAX_FINGERPRINT_LENGTH,
            ));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the fingerprint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
