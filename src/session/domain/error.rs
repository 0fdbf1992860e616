//! Error types for session domain validation.

use thiserror::Error;

/// Errors returned while constructing session domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The owner id is empty after trimming.
    #[error("uid must not be empty")]
    EmptyOwnerId,

    /// The owner id contains whitespace or exceeds the storage limit.
    #[error("invalid uid '{0}'")]
    InvalidOwnerId(String),

    /// The fingerprint is empty after trimming.
    #[error("fingerprint must not be empty")]
    EmptyFingerprint,

    /// The fingerprint exceeds the storage limit.
    #[error("fingerprint exceeds {0} characters")]
    FingerprintTooLong(usize),
}
