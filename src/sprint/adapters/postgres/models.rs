//! Diesel row models for sprint board persistence.

use super::schema::{sprints, tasks};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for sprints.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sprints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SprintRow {
    /// Sprint identifier.
    pub id: i64,
    /// Owning project.
    pub project_id: i64,
    /// Position within the project.
    pub number: i32,
    /// Sprint name.
    pub name: String,
    /// First day.
    pub starts_on: NaiveDate,
    /// Last day.
    pub ends_on: NaiveDate,
    /// Sprint status.
    pub status: String,
    /// Creator roll number.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for sprints.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sprints)]
pub struct NewSprintRow {
    /// Owning project.
    pub project_id: i64,
    /// Position within the project.
    pub number: i32,
    /// Sprint name.
    pub name: String,
    /// First day.
    pub starts_on: NaiveDate,
    /// Last day.
    pub ends_on: NaiveDate,
    /// Sprint status.
    pub status: String,
    /// Creator roll number.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: i64,
    /// Owning sprint.
    pub sprint_id: i64,
    /// Description.
    pub description: String,
    /// Assignee roll number.
    pub assignee: String,
    /// Story points.
    pub points: i16,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning sprint.
    pub sprint_id: i64,
    /// Description.
    pub description: String,
    /// Assignee roll number.
    pub assignee: String,
    /// Story points.
    pub points: i16,
    /// Task status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by task updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChanges {
    /// Description.
    pub description: String,
    /// Assignee roll number.
    pub assignee: String,
    /// Story points.
    pub points: i16,
    /// Task status.
    pub status: String,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
}
