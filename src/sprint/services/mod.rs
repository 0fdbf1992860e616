//! Application services for sprint boards.

mod board;

pub use board::{
    AddTaskRequest, CreateSprintRequest, EditTaskRequest, SprintBoardService,
    SprintBoardServiceError, SprintBoardServiceResult, SprintTasks, TransitionOutcome,
};
