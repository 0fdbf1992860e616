//! Shared world state for task status BDD scenarios.

use std::sync::Arc;

use crate::test_helpers::{ManualClock, OWNER_ROLL};
use cohort::ids::{ProjectId, TaskId};
use cohort::sprint::{
    adapters::memory::InMemorySprintBoard,
    domain::{Sprint, Task},
    services::{
        AddTaskRequest, SprintBoardService, SprintBoardServiceError, TransitionOutcome,
    },
};
use eyre::{WrapErr, eyre};
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = SprintBoardService<InMemorySprintBoard, ManualClock>;

/// Scenario world for task status behaviour tests.
pub struct BoardWorld {
    /// The board service under test.
    pub service: TestBoardService,
    /// Project owning the sprint.
    pub project_id: ProjectId,
    /// Sprint opened by the scenario.
    pub sprint: Option<Sprint>,
    /// Outcome of the latest task creation.
    pub last_added: Option<Result<Task, SprintBoardServiceError>>,
    /// Outcome of the latest named transition.
    pub last_transition: Option<Result<TransitionOutcome, SprintBoardServiceError>>,
}

impl BoardWorld {
    /// Creates a world with an empty board.
    ///
    /// # Panics
    ///
    /// Panics if the fixed project identifier is rejected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: SprintBoardService::new(
                Arc::new(InMemorySprintBoard::new()),
                Arc::new(ManualClock::reference()),
            ),
            project_id: ProjectId::new(1).expect("valid project id"),
            sprint: None,
            last_added: None,
            last_transition: None,
        }
    }

    /// Builds a request adding a task to the scenario sprint.
    pub fn add_request(&self, description: String, points: i64) -> Result<AddTaskRequest, eyre::Report> {
        let sprint = self
            .sprint
            .as_ref()
            .ok_or_else(|| eyre!("missing sprint in scenario world"))?;
        Ok(AddTaskRequest::new(
            self.project_id,
            i64::from(sprint.number().value()),
            description,
            OWNER_ROLL,
            points,
        )
        .requested_by(OWNER_ROLL))
    }

    /// Returns the id of the task created by the scenario.
    pub fn task_id(&self) -> Result<TaskId, eyre::Report> {
        match self.last_added.as_ref() {
            Some(Ok(task)) => Ok(task.id()),
            other => Err(eyre!("no task was created, last outcome {other:?}")),
        }
    }

    /// Reloads every task of the scenario sprint.
    pub fn tasks(&self) -> Result<Vec<Task>, eyre::Report> {
        let board = run_async(self.service.sprint_board(self.project_id))
            .wrap_err("load sprint board")?;
        Ok(board.into_iter().flat_map(|entry| entry.tasks).collect())
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
