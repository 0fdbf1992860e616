//! In-memory sprint board adapters for tests and local runs.

mod board;

pub use board::InMemorySprintBoard;
