//! Service layer for sprint planning and task status changes.
//!
//! Provides [`SprintBoardService`], which validates client input, enforces
//! the open-sprint gate on task creation and translates status labels before
//! anything reaches the repository.

use crate::ids::{InvalidUserId, ProjectId, SprintId, TaskId, UserId};
use crate::sprint::{
    domain::{
        NewSprint, ParseSprintStatusError, ParseStatusLabelError, ProjectProgress, Sprint,
        SprintDomainError, SprintNumber, SprintPeriod, SprintStatus, StatusLabel, StoryPoints,
        Task, TaskDraft, TaskEdit, TaskTransition,
    },
    ports::{SprintBoardRepository, SprintBoardRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for opening a sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSprintRequest {
    project_id: ProjectId,
    name: String,
    start_date: String,
    end_date: String,
    created_by: String,
}

impl CreateSprintRequest {
    /// Creates a request; dates are `YYYY-MM-DD` strings.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            project_id,
            name: name.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            created_by: created_by.into(),
        }
    }
}

/// Request payload for adding a task to a numbered sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    project_id: ProjectId,
    sprint_number: i64,
    description: String,
    assigned_to: String,
    points: i64,
    requested_by: String,
}

impl AddTaskRequest {
    /// Creates a request with every required task field.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        sprint_number: i64,
        description: impl Into<String>,
        assigned_to: impl Into<String>,
        points: i64,
    ) -> Self {
        Self {
            project_id,
            sprint_number,
            description: description.into(),
            assigned_to: assigned_to.into(),
            points,
            requested_by: String::new(),
        }
    }

    /// Records the user adding the task.
    #[must_use]
    pub fn requested_by(mut self, user_id: impl Into<String>) -> Self {
        self.requested_by = user_id.into();
        self
    }
}

/// Request payload for a partial task edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditTaskRequest {
    description: Option<String>,
    assigned_to: Option<String>,
    points: Option<i64>,
    status: Option<String>,
}

impl EditTaskRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Reassigns the task.
    #[must_use]
    pub fn with_assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    /// Re-estimates the task.
    #[must_use]
    pub const fn with_points(mut self, points: i64) -> Self {
        self.points = Some(points);
        self
    }

    /// Moves the task to the status named by `label`.
    #[must_use]
    pub fn with_status(mut self, label: impl Into<String>) -> Self {
        self.status = Some(label.into());
        self
    }

    fn into_edit(self) -> SprintBoardServiceResult<TaskEdit> {
        let mut edit = TaskEdit::default();
        if let Some(description) = self.description {
            edit = edit.with_description(description)?;
        }
        if let Some(assignee) = self.assigned_to {
            edit = edit.with_assignee(UserId::new(assignee)?);
        }
        if let Some(points) = self.points {
            edit = edit.with_points(StoryPoints::new(points)?);
        }
        if let Some(label) = self.status {
            edit = edit.with_status(StatusLabel::try_from(label.as_str())?.status());
        }
        Ok(edit)
    }
}

/// A sprint together with its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SprintTasks {
    /// The sprint.
    pub sprint: Sprint,
    /// Tasks of the sprint ordered by identifier.
    pub tasks: Vec<Task>,
}

/// Result of a named task transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Task after the status write.
    pub task: Task,
    /// Confirmation naming the task and the label.
    pub message: String,
}

/// Service-level errors for sprint board operations.
#[derive(Debug, Error)]
pub enum SprintBoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SprintDomainError),

    /// A user id in the request is malformed.
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),

    /// A status label is outside the external vocabulary.
    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusLabelError),

    /// A sprint status is neither `open` nor `closed`.
    #[error(transparent)]
    InvalidSprintStatus(#[from] ParseSprintStatusError),

    /// The sprint does not exist.
    #[error("Sprint not found")]
    SprintNotFound(SprintId),

    /// The project has no sprint with this number.
    #[error("Sprint {number} not found in project {project_id}")]
    SprintNumberNotFound {
        /// Project searched.
        project_id: ProjectId,
        /// Sprint number requested.
        number: SprintNumber,
    },

    /// The label names a status other than the transition's target.
    #[error("Cannot {transition} a task to {label}; expected {}", transition.target())]
    LabelMismatch {
        /// Transition requested.
        transition: TaskTransition,
        /// Label the client sent.
        label: StatusLabel,
    },

    /// The task does not exist.
    #[error("Task ID does not exist")]
    TaskNotFound(TaskId),

    /// The project has no sprints to show.
    #[error("No sprints found for this project")]
    NoSprints(ProjectId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SprintBoardRepositoryError),
}

/// Result type for sprint board service operations.
pub type SprintBoardServiceResult<T> = Result<T, SprintBoardServiceError>;

/// Sprint planning and task status orchestration service.
pub struct SprintBoardService<R, C>
where
    R: SprintBoardRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> SprintBoardService<R, C>
where
    R: SprintBoardRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new sprint board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Opens the next sprint of a project.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::Domain`] for a blank name, malformed
    /// dates or an inverted window, [`SprintBoardServiceError::InvalidUser`]
    /// for a malformed creator, and [`SprintBoardServiceError::Repository`]
    /// when the sprint cannot be stored.
    pub async fn create_sprint(&self, request: CreateSprintRequest) -> SprintBoardServiceResult<Sprint> {
        let period = SprintPeriod::parse(&request.start_date, &request.end_date)?;
        let created_by = UserId::new(request.created_by)?;
        let new_sprint = NewSprint::new(
            request.project_id,
            request.name,
            period,
            created_by,
            &*self.clock,
        )?;

        let sprint = self.repository.create_sprint(&new_sprint).await?;
        info!(
            project_id = %sprint.project_id(),
            sprint_id = %sprint.id(),
            number = %sprint.number(),
            "sprint opened"
        );
        Ok(sprint)
    }

    /// Lists the sprints of a project in number order.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::Repository`] when lookup fails.
    pub async fn list_sprints(&self, project_id: ProjectId) -> SprintBoardServiceResult<Vec<Sprint>> {
        Ok(self.repository.list_sprints(project_id).await?)
    }

    /// Opens or closes a sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::InvalidSprintStatus`] for an unknown
    /// status and [`SprintBoardServiceError::SprintNotFound`] for a missing
    /// sprint.
    pub async fn change_sprint_status(
        &self,
        sprint_id: SprintId,
        status: &str,
    ) -> SprintBoardServiceResult<Sprint> {
        let target = SprintStatus::try_from(status)?;
        let mut sprint = self
            .repository
            .find_sprint(sprint_id)
            .await?
            .ok_or(SprintBoardServiceError::SprintNotFound(sprint_id))?;

        sprint.set_status(target);
        self.repository.update_sprint(&sprint).await?;
        info!(sprint_id = %sprint_id, status = target.as_str(), "sprint status changed");
        Ok(sprint)
    }

    /// Adds a pending task to the sprint numbered `sprint_number`.
    ///
    /// Fields are validated before the sprint is looked up; nothing is
    /// written unless the sprint is open.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::Domain`] for invalid fields or a
    /// sprint that is not open, and
    /// [`SprintBoardServiceError::SprintNumberNotFound`] when the project has
    /// no such sprint.
    pub async fn add_task(&self, request: AddTaskRequest) -> SprintBoardServiceResult<Task> {
        let number = SprintNumber::new(request.sprint_number)?;
        let draft = TaskDraft::new(request.description, &request.assigned_to, request.points)?;

        let sprint = self
            .repository
            .find_sprint_by_number(request.project_id, number)
            .await?
            .ok_or(SprintBoardServiceError::SprintNumberNotFound {
                project_id: request.project_id,
                number,
            })?;

        let new_task = sprint
            .plan_task(draft, &*self.clock)
            .inspect_err(|_| debug!(sprint_id = %sprint.id(), "task refused by closed sprint"))?;
        let task = self.repository.create_task(&new_task).await?;
        info!(
            task_id = %task.id(),
            sprint_id = %sprint.id(),
            requested_by = request.requested_by.as_str(),
            "task added"
        );
        Ok(task)
    }

    /// Applies a named transition, writing its target status.
    ///
    /// The label must name the transition's target and is checked before the
    /// task is looked up. No check is made against the task's current status
    /// or its sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::InvalidStatus`] for an unknown label,
    /// [`SprintBoardServiceError::LabelMismatch`] for a label naming another
    /// status and [`SprintBoardServiceError::TaskNotFound`] for a missing task.
    pub async fn transition_task(
        &self,
        task_id: TaskId,
        transition: TaskTransition,
        label: &str,
    ) -> SprintBoardServiceResult<TransitionOutcome> {
        let target = StatusLabel::try_from(label)?;
        if target != transition.target() {
            return Err(SprintBoardServiceError::LabelMismatch {
                transition,
                label: target,
            });
        }
        let task = self.write_status(task_id, target).await?;
        Ok(TransitionOutcome {
            message: transition.confirmation(task_id, target),
            task,
        })
    }

    /// Writes the status named by `label` without a named transition.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::InvalidStatus`] for an unknown label
    /// and [`SprintBoardServiceError::TaskNotFound`] for a missing task.
    pub async fn update_task_status(&self, task_id: TaskId, label: &str) -> SprintBoardServiceResult<Task> {
        let target = StatusLabel::try_from(label)?;
        self.write_status(task_id, target).await
    }

    /// Applies a partial edit to a task.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::Domain`] when no field is given or a
    /// field is invalid, [`SprintBoardServiceError::InvalidStatus`] for an
    /// unknown label, and [`SprintBoardServiceError::TaskNotFound`] for a
    /// missing task.
    pub async fn edit_task(&self, task_id: TaskId, request: EditTaskRequest) -> SprintBoardServiceResult<Task> {
        let edit = request.into_edit()?;
        if edit.is_empty() {
            return Err(SprintDomainError::EmptyTaskEdit.into());
        }

        let mut task = self.find_task_or_error(task_id).await?;
        task.apply_edit(edit, &*self.clock)?;
        self.repository.update_task(&task).await?;
        info!(task_id = %task_id, "task edited");
        Ok(task)
    }

    /// Returns every sprint of a project with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::NoSprints`] when the project has no
    /// sprints.
    pub async fn sprint_board(&self, project_id: ProjectId) -> SprintBoardServiceResult<Vec<SprintTasks>> {
        let sprints = self.repository.list_sprints(project_id).await?;
        if sprints.is_empty() {
            return Err(SprintBoardServiceError::NoSprints(project_id));
        }

        let mut board = Vec::with_capacity(sprints.len());
        for sprint in sprints {
            let tasks = self.repository.list_tasks(sprint.id()).await?;
            board.push(SprintTasks { sprint, tasks });
        }
        Ok(board)
    }

    /// Summarises task progress across all sprints of a project.
    ///
    /// A project without sprints or tasks reports zeros.
    ///
    /// # Errors
    ///
    /// Returns [`SprintBoardServiceError::Repository`] when lookup fails.
    pub async fn project_progress(&self, project_id: ProjectId) -> SprintBoardServiceResult<ProjectProgress> {
        let mut tasks = Vec::new();
        for sprint in self.repository.list_sprints(project_id).await? {
            tasks.extend(self.repository.list_tasks(sprint.id()).await?);
        }
        Ok(ProjectProgress::from_tasks(&tasks))
    }

    async fn write_status(&self, task_id: TaskId, target: StatusLabel) -> SprintBoardServiceResult<Task> {
        let mut task = self.find_task_or_error(task_id).await?;
        task.set_status(target.status(), &*self.clock);
        self.repository.update_task(&task).await?;
        info!(task_id = %task_id, status = target.status().as_str(), "task status written");
        Ok(task)
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> SprintBoardServiceResult<Task> {
        self.repository
            .find_task(task_id)
            .await?
            .ok_or(SprintBoardServiceError::TaskNotFound(task_id))
    }
}
