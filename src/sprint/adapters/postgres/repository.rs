//! `PostgreSQL` repository for sprints and tasks.

use super::{
    models::{NewSprintRow, NewTaskRow, SprintRow, TaskChanges, TaskRow},
    schema::{sprints, tasks},
};
use crate::ids::{ProjectId, SprintId, TaskId, UserId};
use crate::persistence::{PgPool, with_connection};
use crate::sprint::{
    domain::{
        NewSprint, NewTask, PersistedSprintData, PersistedTaskData, Sprint, SprintNumber,
        SprintPeriod, SprintStatus, StoryPoints, Task, TaskStatus,
    },
    ports::{SprintBoardRepository, SprintBoardRepositoryError, SprintBoardResult},
};
use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed sprint board repository.
#[derive(Debug, Clone)]
pub struct PostgresSprintBoard {
    pool: PgPool,
}

impl PostgresSprintBoard {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SprintBoardRepository for PostgresSprintBoard {
    async fn create_sprint(&self, sprint: &NewSprint) -> SprintBoardResult<Sprint> {
        let project_id = sprint.project_id().value();
        let period = sprint.period();
        let mut row = NewSprintRow {
            project_id,
            number: SprintNumber::FIRST.value(),
            name: sprint.name().to_owned(),
            starts_on: period.starts_on(),
            ends_on: period.ends_on(),
            status: SprintStatus::Open.as_str().to_owned(),
            created_by: sprint.created_by().as_str().to_owned(),
            created_at: sprint.created_at(),
        };

        with_connection(&self.pool, move |connection| {
            // The unique (project_id, number) index rejects a concurrent
            // insert that read the same maximum.
            let inserted = connection
                .transaction::<SprintRow, DieselError, _>(|tx| {
                    let last = sprints::table
                        .filter(sprints::project_id.eq(project_id))
                        .select(max(sprints::number))
                        .first::<Option<i32>>(tx)?;
                    row.number = last.map_or(row.number, |number| number.saturating_add(1));
                    diesel::insert_into(sprints::table)
                        .values(&row)
                        .returning(SprintRow::as_returning())
                        .get_result(tx)
                })
                .map_err(SprintBoardRepositoryError::persistence)?;
            row_to_sprint(inserted)
        })
        .await
    }

    async fn update_sprint(&self, sprint: &Sprint) -> SprintBoardResult<()> {
        let id = sprint.id();
        let name = sprint.name().to_owned();
        let status = sprint.status().as_str();
        with_connection(&self.pool, move |connection| {
            let updated = diesel::update(sprints::table.find(id.value()))
                .set((sprints::name.eq(name), sprints::status.eq(status)))
                .execute(connection)
                .map_err(SprintBoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(SprintBoardRepositoryError::SprintNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_sprint(&self, id: SprintId) -> SprintBoardResult<Option<Sprint>> {
        with_connection(&self.pool, move |connection| {
            let row = sprints::table
                .find(id.value())
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()
                .map_err(SprintBoardRepositoryError::persistence)?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn find_sprint_by_number(
        &self,
        project_id: ProjectId,
        number: SprintNumber,
    ) -> SprintBoardResult<Option<Sprint>> {
        with_connection(&self.pool, move |connection| {
            let row = sprints::table
                .filter(sprints::project_id.eq(project_id.value()))
                .filter(sprints::number.eq(number.value()))
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()
                .map_err(SprintBoardRepositoryError::persistence)?;
            row.map(row_to_sprint).transpose()
        })
        .await
    }

    async fn list_sprints(&self, project_id: ProjectId) -> SprintBoardResult<Vec<Sprint>> {
        with_connection(&self.pool, move |connection| {
            sprints::table
                .filter(sprints::project_id.eq(project_id.value()))
                .order(sprints::number.asc())
                .select(SprintRow::as_select())
                .load::<SprintRow>(connection)
                .map_err(SprintBoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_sprint)
                .collect()
        })
        .await
    }

    async fn create_task(&self, task: &NewTask) -> SprintBoardResult<Task> {
        let sprint_id = task.sprint_id();
        let row = NewTaskRow {
            sprint_id: sprint_id.value(),
            description: task.description().to_owned(),
            assignee: task.assignee().as_str().to_owned(),
            points: i16::from(task.points().value()),
            status: task.status().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.created_at(),
        };
        with_connection(&self.pool, move |connection| {
            let inserted = diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        SprintBoardRepositoryError::SprintNotFound(sprint_id)
                    }
                    _ => SprintBoardRepositoryError::persistence(err),
                })?;
            row_to_task(inserted)
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> SprintBoardResult<()> {
        let id = task.id();
        let changes = TaskChanges {
            description: task.description().to_owned(),
            assignee: task.assignee().as_str().to_owned(),
            points: i16::from(task.points().value()),
            status: task.status().as_str().to_owned(),
            updated_at: task.updated_at(),
        };
        with_connection(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.find(id.value()))
                .set(&changes)
                .execute(connection)
                .map_err(SprintBoardRepositoryError::persistence)?;
            if updated == 0 {
                return Err(SprintBoardRepositoryError::TaskNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> SprintBoardResult<Option<Task>> {
        with_connection(&self.pool, move |connection| {
            let row = tasks::table
                .find(id.value())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(SprintBoardRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks(&self, sprint_id: SprintId) -> SprintBoardResult<Vec<Task>> {
        with_connection(&self.pool, move |connection| {
            tasks::table
                .filter(tasks::sprint_id.eq(sprint_id.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(SprintBoardRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }
}

fn invalid(err: impl std::error::Error + Send + Sync + 'static) -> SprintBoardRepositoryError {
    SprintBoardRepositoryError::invalid_persisted_data(err)
}

fn row_to_sprint(row: SprintRow) -> SprintBoardResult<Sprint> {
    let data = PersistedSprintData {
        id: SprintId::new(row.id).map_err(invalid)?,
        project_id: ProjectId::new(row.project_id).map_err(invalid)?,
        number: SprintNumber::new(i64::from(row.number)).map_err(invalid)?,
        name: row.name,
        period: SprintPeriod::new(row.starts_on, row.ends_on).map_err(invalid)?,
        status: SprintStatus::try_from(row.status.as_str()).map_err(invalid)?,
        created_by: UserId::new(row.created_by).map_err(invalid)?,
        created_at: row.created_at,
    };
    Ok(Sprint::from_persisted(data))
}

fn row_to_task(row: TaskRow) -> SprintBoardResult<Task> {
    let data = PersistedTaskData {
        id: TaskId::new(row.id).map_err(invalid)?,
        sprint_id: SprintId::new(row.sprint_id).map_err(invalid)?,
        description: row.description,
        assignee: UserId::new(row.assignee).map_err(invalid)?,
        points: StoryPoints::new(i64::from(row.points)).map_err(invalid)?,
        status: TaskStatus::try_from(row.status.as_str()).map_err(invalid)?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Task::from_persisted(data))
}
