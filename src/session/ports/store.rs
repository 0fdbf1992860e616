//! Record store port for session persistence.

use crate::persistence::PersistenceFailure;
use crate::session::domain::{OwnerId, SessionRecord};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Document-style session persistence contract.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes `record` under its owner id, replacing any previous record.
    ///
    /// Concurrent writes for one owner are last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Persistence`] when the write fails.
    async fn put(&self, record: &SessionRecord) -> SessionStoreResult<()>;

    /// Finds the record stored for `owner_id`.
    ///
    /// Returns `None` when the owner never completed a handshake.
    async fn find(&self, owner_id: &OwnerId) -> SessionStoreResult<Option<SessionRecord>>;
}

/// Errors returned by session store implementations.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// A stored document could not be reconstructed into a record.
    #[error("invalid persisted session: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SessionStoreError {
    /// Wraps a data-quality or deserialization error from stored documents.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl PersistenceFailure for SessionStoreError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
