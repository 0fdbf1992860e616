//! Task entity, its creation draft and partial edits.

use super::{SprintDomainError, TaskStatus};
use crate::ids::{SprintId, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

const MAX_STORY_POINTS: u8 = 100;

/// Effort estimate of a task, between 1 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryPoints(u8);

impl StoryPoints {
    /// Creates validated story points.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidStoryPoints`] outside `1..=100`.
    pub fn new(value: i64) -> Result<Self, SprintDomainError> {
        u8::try_from(value)
            .ok()
            .filter(|points| (1..=MAX_STORY_POINTS).contains(points))
            .map(Self)
            .ok_or(SprintDomainError::InvalidStoryPoints(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

fn non_blank(raw: String) -> Result<String, SprintDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SprintDomainError::EmptyTaskDescription);
    }
    Ok(trimmed.to_owned())
}

/// Validated task fields supplied by a client before a sprint is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    description: String,
    assignee: UserId,
    points: StoryPoints,
}

impl TaskDraft {
    /// Creates a validated task draft.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyTaskDescription`],
    /// [`SprintDomainError::InvalidAssignee`] or
    /// [`SprintDomainError::InvalidStoryPoints`] for the offending field.
    pub fn new(
        description: impl Into<String>,
        assignee: &str,
        points: i64,
    ) -> Result<Self, SprintDomainError> {
        Ok(Self {
            description: non_blank(description.into())?,
            assignee: UserId::new(assignee)?,
            points: StoryPoints::new(points)?,
        })
    }
}

/// Task planned into a sprint, awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    sprint_id: SprintId,
    description: String,
    assignee: UserId,
    points: StoryPoints,
    created_at: DateTime<Utc>,
}

impl NewTask {
    pub(super) fn new(sprint_id: SprintId, draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            sprint_id,
            description: draft.description,
            assignee: draft.assignee,
            points: draft.points,
            created_at: clock.utc(),
        }
    }

    /// Returns the owning sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &UserId {
        &self.assignee
    }

    /// Returns the story points.
    #[must_use]
    pub const fn points(&self) -> StoryPoints {
        self.points
    }

    /// New tasks always start pending.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        TaskStatus::Pending
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes the task once the store has assigned its identifier.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            sprint_id: self.sprint_id,
            description: self.description,
            assignee: self.assignee,
            points: self.points,
            status: TaskStatus::Pending,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    description: Option<String>,
    assignee: Option<UserId>,
    points: Option<StoryPoints>,
    status: Option<TaskStatus>,
}

impl TaskEdit {
    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyTaskDescription`] when blank.
    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self, SprintDomainError> {
        self.description = Some(non_blank(description.into())?);
        Ok(self)
    }

    /// Reassigns the task.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Re-estimates the task.
    #[must_use]
    pub const fn with_points(mut self, points: StoryPoints) -> Self {
        self.points = Some(points);
        self
    }

    /// Moves the task to `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when the edit names no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.assignee.is_none()
            && self.points.is_none()
            && self.status.is_none()
    }
}

/// Task entity owned by a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    sprint_id: SprintId,
    description: String,
    assignee: UserId,
    points: StoryPoints,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning sprint.
    pub sprint_id: SprintId,
    /// Task description.
    pub description: String,
    /// Assigned user.
    pub assignee: UserId,
    /// Story points.
    pub points: StoryPoints,
    /// Persisted status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            sprint_id: data.sprint_id,
            description: data.description,
            assignee: data.assignee,
            points: data.points,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning sprint.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &UserId {
        &self.assignee
    }

    /// Returns the story points.
    #[must_use]
    pub const fn points(&self) -> StoryPoints {
        self.points
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Writes `status` regardless of the current one.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }

    /// Applies every field named by `edit`.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptyTaskEdit`] when `edit` names no
    /// field.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) -> Result<(), SprintDomainError> {
        if edit.is_empty() {
            return Err(SprintDomainError::EmptyTaskEdit);
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(assignee) = edit.assignee {
            self.assignee = assignee;
        }
        if let Some(points) = edit.points {
            self.points = points;
        }
        if let Some(status) = edit.status {
            self.status = status;
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
