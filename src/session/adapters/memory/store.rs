//! In-memory session record store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::session::{
    domain::{OwnerId, SessionRecord},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};

/// Thread-safe in-memory session store keyed by owner id.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    records: Arc<RwLock<HashMap<OwnerId, SessionRecord>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> SessionStoreError {
    SessionStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, record: &SessionRecord) -> SessionStoreResult<()> {
        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(record.owner_id().clone(), record.clone());
        Ok(())
    }

    async fn find(&self, owner_id: &OwnerId) -> SessionStoreResult<Option<SessionRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(owner_id).cloned())
    }
}
