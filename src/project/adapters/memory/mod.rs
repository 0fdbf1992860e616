//! In-memory project adapters for tests and local runs.

mod directory;
mod repository;

pub use directory::InMemoryUserDirectory;
pub use repository::InMemoryProjectRepository;
