//! `PostgreSQL` session store storing one JSONB document per owner.

use super::{
    models::{NewSessionRow, SessionDocument, SessionRow},
    schema::user_sessions,
};
use crate::persistence::{PgPool, with_connection};
use crate::session::{
    domain::{Fingerprint, OwnerId, SessionRecord},
    ports::{SessionStore, SessionStoreError, SessionStoreResult},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed session store.
#[derive(Debug, Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PostgresSessionStore {
    async fn put(&self, record: &SessionRecord) -> SessionStoreResult<()> {
        let row = to_new_row(record)?;
        with_connection(&self.pool, move |connection| {
            diesel::insert_into(user_sessions::table)
                .values(&row)
                .on_conflict(user_sessions::owner_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(SessionStoreError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find(&self, owner_id: &OwnerId) -> SessionStoreResult<Option<SessionRecord>> {
        let key = owner_id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = user_sessions::table
                .filter(user_sessions::owner_id.eq(key))
                .select(SessionRow::as_select())
                .first::<SessionRow>(connection)
                .optional()
                .map_err(SessionStoreError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }
}

fn to_new_row(record: &SessionRecord) -> SessionStoreResult<NewSessionRow> {
    let snapshot = SessionDocument {
        uid: record.owner_id().as_str().to_owned(),
        fingerprint: record.fingerprint().as_str().to_owned(),
        created_at: record.created_at(),
    };
    let document = serde_json::to_value(snapshot).map_err(SessionStoreError::persistence)?;

    Ok(NewSessionRow {
        owner_id: record.owner_id().as_str().to_owned(),
        document,
        created_at: record.created_at(),
    })
}

fn row_to_record(row: SessionRow) -> SessionStoreResult<SessionRecord> {
    let document = serde_json::from_value::<SessionDocument>(row.document)
        .map_err(SessionStoreError::invalid_persisted_data)?;
    let owner_id = OwnerId::new(row.owner_id).map_err(SessionStoreError::invalid_persisted_data)?;
    let fingerprint =
        Fingerprint::new(document.fingerprint).map_err(SessionStoreError::invalid_persisted_data)?;

    Ok(SessionRecord::from_persisted(
        owner_id,
        fingerprint,
        row.created_at,
    ))
}
