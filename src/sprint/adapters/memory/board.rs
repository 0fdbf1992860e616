//! In-memory repository for sprints and tasks.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::ids::{ProjectId, SprintId, TaskId};
use crate::sprint::{
    domain::{NewSprint, NewTask, Sprint, SprintNumber, Task},
    ports::{SprintBoardRepository, SprintBoardRepositoryError, SprintBoardResult},
};

/// Thread-safe in-memory sprint board repository.
///
/// Identifiers are handed out from per-kind counters starting at 1, so
/// clones share one numbering sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemorySprintBoard {
    state: Arc<RwLock<BoardState>>,
}

#[derive(Debug, Default)]
struct BoardState {
    sprints: BTreeMap<SprintId, Sprint>,
    tasks: BTreeMap<TaskId, Task>,
    last_sprint_id: i64,
    last_task_id: i64,
}

impl InMemorySprintBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> SprintBoardRepositoryError {
    SprintBoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn next_number(state: &BoardState, project_id: ProjectId) -> SprintBoardResult<SprintNumber> {
    state
        .sprints
        .values()
        .filter(|sprint| sprint.project_id() == project_id)
        .map(Sprint::number)
        .max()
        .map_or(Ok(SprintNumber::FIRST), SprintNumber::next)
        .map_err(SprintBoardRepositoryError::persistence)
}

#[async_trait]
impl SprintBoardRepository for InMemorySprintBoard {
    async fn create_sprint(&self, sprint: &NewSprint) -> SprintBoardResult<Sprint> {
        let mut state = self.state.write().map_err(poisoned)?;
        let number = next_number(&state, sprint.project_id())?;
        let id = SprintId::new(state.last_sprint_id + 1)
            .map_err(SprintBoardRepositoryError::persistence)?;
        state.last_sprint_id = id.value();

        let created = sprint.clone().into_sprint(id, number);
        state.sprints.insert(id, created.clone());
        Ok(created)
    }

    async fn update_sprint(&self, sprint: &Sprint) -> SprintBoardResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .sprints
            .get_mut(&sprint.id())
            .ok_or(SprintBoardRepositoryError::SprintNotFound(sprint.id()))?;
        *slot = sprint.clone();
        Ok(())
    }

    async fn find_sprint(&self, id: SprintId) -> SprintBoardResult<Option<Sprint>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.sprints.get(&id).cloned())
    }

    async fn find_sprint_by_number(
        &self,
        project_id: ProjectId,
        number: SprintNumber,
    ) -> SprintBoardResult<Option<Sprint>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .sprints
            .values()
            .find(|sprint| sprint.project_id() == project_id && sprint.number() == number)
            .cloned())
    }

    async fn list_sprints(&self, project_id: ProjectId) -> SprintBoardResult<Vec<Sprint>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut sprints: Vec<Sprint> = state
            .sprints
            .values()
            .filter(|sprint| sprint.project_id() == project_id)
            .cloned()
            .collect();
        sprints.sort_by_key(Sprint::number);
        Ok(sprints)
    }

    async fn create_task(&self, task: &NewTask) -> SprintBoardResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.sprints.contains_key(&task.sprint_id()) {
            return Err(SprintBoardRepositoryError::SprintNotFound(task.sprint_id()));
        }
        let id = TaskId::new(state.last_task_id + 1)
            .map_err(SprintBoardRepositoryError::persistence)?;
        state.last_task_id = id.value();

        let created = task.clone().into_task(id);
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn update_task(&self, task: &Task) -> SprintBoardResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(SprintBoardRepositoryError::TaskNotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> SprintBoardResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list_tasks(&self, sprint_id: SprintId) -> SprintBoardResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.sprint_id() == sprint_id)
            .cloned()
            .collect())
    }
}
