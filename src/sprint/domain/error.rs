//! Error types for sprint and task validation and parsing.

use crate::ids::InvalidUserId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or changing sprints and tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SprintDomainError {
    /// The sprint name is empty after trimming.
    #[error("sprint name must not be empty")]
    EmptySprintName,

    /// A date was not given as `YYYY-MM-DD`.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The sprint would end before it starts.
    #[error("sprint end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },

    /// The sprint number is not a positive position.
    #[error("invalid sprint number {0}, expected a positive integer")]
    InvalidSprintNumber(i64),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyTaskDescription,

    /// The assignee is not a valid user id.
    #[error(transparent)]
    InvalidAssignee(#[from] InvalidUserId),

    /// Story points are outside the accepted range.
    #[error("story points must be between 1 and 100, got {0}")]
    InvalidStoryPoints(i64),

    /// Tasks can only be planned into open sprints.
    #[error("Cannot add task. Sprint is not open.")]
    SprintNotOpen,

    /// A task edit named no field.
    #[error("No fields provided to update")]
    EmptyTaskEdit,
}

/// Error returned while parsing sprint statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sprint status: {0}")]
pub struct ParseSprintStatusError(pub String);

/// Error returned while parsing stored task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned for a status label outside the external vocabulary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid status: {0}")]
pub struct ParseStatusLabelError(pub String);
