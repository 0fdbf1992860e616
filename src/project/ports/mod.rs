//! Port contracts for projects and user profiles.

pub mod directory;
pub mod repository;

pub use directory::UserDirectory;
pub use repository::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
