//! Diesel row models for session persistence.

use super::schema::user_sessions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query result row for session documents.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_sessions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SessionRow {
    /// Owner id the document is keyed by.
    pub owner_id: String,
    /// JSON session document.
    pub document: Value,
    /// Handshake timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for session documents.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = user_sessions)]
pub struct NewSessionRow {
    /// Owner id the document is keyed by.
    pub owner_id: String,
    /// JSON session document.
    pub document: Value,
    /// Handshake timestamp.
    pub created_at: DateTime<Utc>,
}

/// Shape of the JSON document stored per owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    /// Identity-provider subject id.
    pub uid: String,
    /// Device fingerprint bound at handshake time.
    pub fingerprint: String,
    /// Handshake timestamp.
    pub created_at: DateTime<Utc>,
}
