//! Service layer for the verify-token-then-issue-cookie handshake.

use crate::session::{
    domain::{Fingerprint, OwnerId, SessionDomainError, SessionRecord, VerifiedIdentity},
    ports::{IdentityError, IdentityProvider, SessionStore, SessionStoreError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for establishing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandshakeRequest {
    id_token: String,
    owner_id: String,
    fingerprint: String,
}

impl HandshakeRequest {
    /// Creates a handshake request from raw client input.
    #[must_use]
    pub fn new(
        id_token: impl Into<String>,
        owner_id: impl Into<String>,
        fingerprint: impl Into<String>,
    ) -> Self {
        Self {
            id_token: id_token.into(),
            owner_id: owner_id.into(),
            fingerprint: fingerprint.into(),
        }
    }
}

/// Outcome of a successful handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    /// Record persisted for the owner.
    pub record: SessionRecord,
    /// Identity asserted by the verified token.
    pub identity: VerifiedIdentity,
}

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),

    /// The identity provider refused or could not check the token.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The token is valid but belongs to someone other than the claimed
    /// owner.
    #[error("token subject does not match uid")]
    SubjectMismatch,

    /// No stored record admits the presented cookies.
    #[error("Session expired")]
    SessionExpired,

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Result type for session service operations.
pub type SessionServiceResult<T> = Result<T, SessionServiceError>;

/// Session handshake and revalidation service.
///
/// Generic over unsized ports so the HTTP layer can hold trait objects
/// selected at startup.
pub struct SessionService<I, S, C>
where
    I: IdentityProvider + ?Sized,
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    identity: Arc<I>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<I, S, C> SessionService<I, S, C>
where
    I: IdentityProvider + ?Sized,
    S: SessionStore + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new session service.
    #[must_use]
    pub const fn new(identity: Arc<I>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            identity,
            store,
            clock,
        }
    }

    /// Verifies the token and records the owner's device fingerprint.
    ///
    /// Nothing is persisted unless the token subject equals the claimed
    /// owner id. A previous record for the owner is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::Domain`] for blank input,
    /// [`SessionServiceError::Identity`] or
    /// [`SessionServiceError::SubjectMismatch`] when verification fails, and
    /// [`SessionServiceError::Store`] when the record cannot be written.
    pub async fn handshake(&self, request: HandshakeRequest) -> SessionServiceResult<Handshake> {
        let owner_id = OwnerId::new(request.owner_id)?;
        let fingerprint = Fingerprint::new(request.fingerprint)?;

        let identity = self
            .identity
            .verify_token(&request.id_token)
            .await
            .inspect_err(|err| warn!(owner_id = %owner_id, error = %err, "token verification failed"))?;

        if identity.subject() != owner_id.as_str() {
            warn!(
                owner_id = %owner_id,
                subject = identity.subject(),
                "token subject does not match claimed owner"
            );
            return Err(SessionServiceError::SubjectMismatch);
        }

        let record = SessionRecord::new(owner_id, fingerprint, &*self.clock);
        self.store.put(&record).await?;
        info!(owner_id = %record.owner_id(), "session established");

        Ok(Handshake { record, identity })
    }

    /// Accepts a returning client if its cookies match a fresh record.
    ///
    /// Missing or malformed cookie values, an unknown owner, a fingerprint
    /// mismatch, and a record older than three days all report
    /// [`SessionServiceError::SessionExpired`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionServiceError::SessionExpired`] as described above, or
    /// [`SessionServiceError::Store`] when the lookup itself fails.
    pub async fn revalidate(
        &self,
        owner_cookie: Option<&str>,
        fingerprint_cookie: Option<&str>,
    ) -> SessionServiceResult<SessionRecord> {
        let (Some(raw_owner), Some(raw_fingerprint)) = (owner_cookie, fingerprint_cookie) else {
            debug!("session cookies missing");
            return Err(SessionServiceError::SessionExpired);
        };
        let (Ok(owner_id), Ok(fingerprint)) =
            (OwnerId::new(raw_owner), Fingerprint::new(raw_fingerprint))
        else {
            return Err(SessionServiceError::SessionExpired);
        };

        let record = self
            .store
            .find(&owner_id)
            .await?
            .ok_or(SessionServiceError::SessionExpired)?;

        if !record.admits(&fingerprint, self.clock.utc()) {
            debug!(owner_id = %owner_id, "session record does not admit client");
            return Err(SessionServiceError::SessionExpired);
        }

        Ok(record)
    }
}
