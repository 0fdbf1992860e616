//! Repository port for sprint and task persistence.

use crate::ids::{ProjectId, SprintId, TaskId};
use crate::persistence::PersistenceFailure;
use crate::sprint::domain::{NewSprint, NewTask, Sprint, SprintNumber, Task};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for sprint board repository operations.
pub type SprintBoardResult<T> = Result<T, SprintBoardRepositoryError>;

/// Sprint and task persistence contract.
#[async_trait]
pub trait SprintBoardRepository: Send + Sync {
    /// Stores a new sprint, numbering it after the project's last sprint.
    async fn create_sprint(&self, sprint: &NewSprint) -> SprintBoardResult<Sprint>;

    /// Persists changes to an existing sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardRepositoryError::SprintNotFound`] when the sprint
    /// does not exist.
    async fn update_sprint(&self, sprint: &Sprint) -> SprintBoardResult<()>;

    /// Finds a sprint by identifier.
    async fn find_sprint(&self, id: SprintId) -> SprintBoardResult<Option<Sprint>>;

    /// Finds a sprint by its position within a project.
    async fn find_sprint_by_number(
        &self,
        project_id: ProjectId,
        number: SprintNumber,
    ) -> SprintBoardResult<Option<Sprint>>;

    /// Returns the sprints of a project ordered by number.
    async fn list_sprints(&self, project_id: ProjectId) -> SprintBoardResult<Vec<Sprint>>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardRepositoryError::SprintNotFound`] when the owning
    /// sprint does not exist.
    async fn create_task(&self, task: &NewTask) -> SprintBoardResult<Task>;

    /// Persists changes to an existing task as a single row update.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardRepositoryError::TaskNotFound`] when the task
    /// does not exist.
    async fn update_task(&self, task: &Task) -> SprintBoardResult<()>;

    /// Finds a task by identifier.
    async fn find_task(&self, id: TaskId) -> SprintBoardResult<Option<Task>>;

    /// Returns the tasks of a sprint ordered by identifier.
    async fn list_tasks(&self, sprint_id: SprintId) -> SprintBoardResult<Vec<Task>>;
}

/// Errors returned by sprint board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SprintBoardRepositoryError {
    /// The sprint was not found.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A stored row could not be reconstructed into a domain value.
    #[error("invalid persisted sprint data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SprintBoardRepositoryError {
    /// Wraps a data-quality error from stored rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl PersistenceFailure for SprintBoardRepositoryError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
