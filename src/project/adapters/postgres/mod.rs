//! `PostgreSQL` adapters for projects and user profiles.

mod directory;
mod models;
mod repository;
mod schema;

pub use directory::PostgresUserDirectory;
pub use repository::PostgresProjectRepository;
