//! Sprint aggregate and the values needed to open one.

use super::{NewTask, SprintDomainError, SprintStatus, TaskDraft};
use crate::ids::{ProjectId, SprintId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One-based position of a sprint within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprintNumber(i32);

impl SprintNumber {
    /// Number given to the first sprint of a project.
    pub const FIRST: Self = Self(1);

    /// Creates a validated sprint number.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintNumber`] when the value is
    /// not positive or does not fit the storage column.
    pub fn new(value: i64) -> Result<Self, SprintDomainError> {
        i32::try_from(value)
            .ok()
            .filter(|number| *number > 0)
            .map(Self)
            .ok_or(SprintDomainError::InvalidSprintNumber(value))
    }

    /// Returns the number that follows this one.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidSprintNumber`] on overflow.
    pub fn next(self) -> Result<Self, SprintDomainError> {
        self.0
            .checked_add(1)
            .map(Self)
            .ok_or(SprintDomainError::InvalidSprintNumber(i64::from(self.0)))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SprintNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive calendar window of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintPeriod {
    starts_on: NaiveDate,
    ends_on: NaiveDate,
}

impl SprintPeriod {
    /// Creates a period, rejecting one that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EndBeforeStart`] when `ends_on` precedes
    /// `starts_on`.
    pub fn new(starts_on: NaiveDate, ends_on: NaiveDate) -> Result<Self, SprintDomainError> {
        if ends_on < starts_on {
            return Err(SprintDomainError::EndBeforeStart {
                start: starts_on,
                end: ends_on,
            });
        }
        Ok(Self { starts_on, ends_on })
    }

    /// Parses a period from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::InvalidDate`] for malformed dates and
    /// [`SprintDomainError::EndBeforeStart`] for an inverted window.
    pub fn parse(start: &str, end: &str) -> Result<Self, SprintDomainError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Returns the first day.
    #[must_use]
    pub const fn starts_on(&self) -> NaiveDate {
        self.starts_on
    }

    /// Returns the last day.
    #[must_use]
    pub const fn ends_on(&self) -> NaiveDate {
        self.ends_on
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, SprintDomainError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| SprintDomainError::InvalidDate(raw.to_owned()))
}

/// Validated request to open a sprint; the store assigns id and number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSprint {
    project_id: ProjectId,
    name: String,
    period: SprintPeriod,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl NewSprint {
    /// Creates a new open sprint request.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EmptySprintName`] when `name` is blank.
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        period: SprintPeriod,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, SprintDomainError> {
        let raw_name = name.into();
        let trimmed = raw_name.trim();
        if trimmed.is_empty() {
            return Err(SprintDomainError::EmptySprintName);
        }

        Ok(Self {
            project_id,
            name: trimmed.to_owned(),
            period,
            created_by,
            created_at: clock.utc(),
        })
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sprint window.
    #[must_use]
    pub const fn period(&self) -> SprintPeriod {
        self.period
    }

    /// Returns the user who opened the sprint.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Completes the request into a sprint once the store has assigned its
    /// identity. New sprints are always open.
    #[must_use]
    pub fn into_sprint(self, id: SprintId, number: SprintNumber) -> Sprint {
        Sprint {
            id,
            project_id: self.project_id,
            number,
            name: self.name,
            period: self.period,
            status: SprintStatus::Open,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// Sprint aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    id: SprintId,
    project_id: ProjectId,
    number: SprintNumber,
    name: String,
    period: SprintPeriod,
    status: SprintStatus,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted sprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSprintData {
    /// Persisted sprint identifier.
    pub id: SprintId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Position within the project.
    pub number: SprintNumber,
    /// Sprint name.
    pub name: String,
    /// Sprint window.
    pub period: SprintPeriod,
    /// Persisted status.
    pub status: SprintStatus,
    /// User who opened the sprint.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Sprint {
    /// Reconstructs a sprint from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSprintData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            number: data.number,
            name: data.name,
            period: data.period,
            status: data.status,
            created_by: data.created_by,
            created_at: data.created_at,
        }
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the position within the project.
    #[must_use]
    pub const fn number(&self) -> SprintNumber {
        self.number
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sprint window.
    #[must_use]
    pub const fn period(&self) -> SprintPeriod {
        self.period
    }

    /// Returns the sprint status.
    #[must_use]
    pub const fn status(&self) -> SprintStatus {
        self.status
    }

    /// Returns the user who opened the sprint.
    #[must_use]
    pub const fn created_by(&self) -> &UserId {
        &self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the sprint status. Either status may follow either.
    pub const fn set_status(&mut self, status: SprintStatus) {
        self.status = status;
    }

    /// Plans a task into this sprint.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::SprintNotOpen`] unless the sprint is
    /// open.
    pub fn plan_task(&self, draft: TaskDraft, clock: &impl Clock) -> Result<NewTask, SprintDomainError> {
        if self.status != SprintStatus::Open {
            return Err(SprintDomainError::SprintNotOpen);
        }
        Ok(NewTask::new(self.id, draft, clock))
    }
}
