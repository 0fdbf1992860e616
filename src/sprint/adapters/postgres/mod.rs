//! `PostgreSQL` adapter for sprints and tasks.

mod models;
mod repository;
mod schema;

pub use repository::PostgresSprintBoard;
