//! `PostgreSQL` adapter for session records.

mod models;
mod schema;
mod store;

pub use store::PostgresSessionStore;
