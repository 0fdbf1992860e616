//! Identity provider port for token verification.

use crate::session::domain::VerifiedIdentity;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity provider operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Third-party identity verification contract.
///
/// One provider client is built at startup and shared read-only by every
/// request.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies an opaque signed token and returns the identity it asserts.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Rejected`] when the provider refuses the
    /// token, or [`IdentityError::Unavailable`] when the provider cannot be
    /// reached or answers with something unreadable.
    async fn verify_token(&self, id_token: &str) -> IdentityResult<VerifiedIdentity>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// The provider rejected the token.
    #[error("token rejected: {0}")]
    Rejected(String),

    /// The provider could not be consulted.
    #[error("identity provider unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityError {
    /// Wraps a transport or decoding failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
