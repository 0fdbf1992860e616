//! Port contracts for sprint boards.

pub mod repository;

pub use repository::{SprintBoardRepository, SprintBoardRepositoryError, SprintBoardResult};
