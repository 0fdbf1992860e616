//! Diesel schema for session records.

diesel::table! {
    /// Session documents keyed by owner id.
    user_sessions (owner_id) {
        /// Identity-provider subject id.
        #[max_length = 128]
        owner_id -> Varchar,
        /// Session document (`uid`, `fingerprint`, `created_at`).
        document -> Jsonb,
        /// Handshake timestamp, duplicated out of the document for range
        /// filters.
        created_at -> Timestamptz,
    }
}
