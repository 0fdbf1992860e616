//! Applications to join a project.

use super::{MemberRole, ParseApplicationOriginError, ParseApplicationStatusError, ProjectDomainError};
use crate::ids::{ApplicationId, ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting a decision.
    Pending,
    /// Accepted; the applicant is a member.
    Accepted,
    /// Turned down.
    Rejected,
    /// Taken back by the applicant.
    Withdrawn,
}

impl ApplicationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
        }
    }

    /// Returns `true` while the application awaits a decision.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "withdrawn" => Ok(Self::Withdrawn),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who opened an application.
///
/// Users apply to projects; project admins send requests that the invited
/// user answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationOrigin {
    /// The applicant asked to join.
    User,
    /// A project admin invited the applicant.
    Admin,
}

impl ApplicationOrigin {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for ApplicationOrigin {
    type Error = ParseApplicationOriginError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseApplicationOriginError(value.to_owned())),
        }
    }
}

/// Outcome a reviewer may give a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationDecision {
    /// Admit the applicant as a member.
    Accept,
    /// Turn the applicant down.
    Reject,
}

impl TryFrom<&str> for ApplicationDecision {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match ApplicationStatus::try_from(value) {
            Ok(ApplicationStatus::Accepted) => Ok(Self::Accept),
            Ok(ApplicationStatus::Rejected) => Ok(Self::Reject),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

/// Application awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    project_id: ProjectId,
    applicant: UserId,
    role: MemberRole,
    origin: ApplicationOrigin,
    applied_at: DateTime<Utc>,
}

impl NewApplication {
    /// Creates a pending user application for plain membership.
    #[must_use]
    pub fn new(project_id: ProjectId, applicant: UserId, clock: &impl Clock) -> Self {
        Self {
            project_id,
            applicant,
            role: MemberRole::Member,
            origin: ApplicationOrigin::User,
            applied_at: clock.utc(),
        }
    }

    /// Asks for `role` instead of plain membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::RoleNotRequestable`] for `owner` and
    /// `moderator`.
    pub fn requesting(mut self, role: MemberRole) -> Result<Self, ProjectDomainError> {
        if !role.is_requestable() {
            return Err(ProjectDomainError::RoleNotRequestable(role));
        }
        self.role = role;
        Ok(self)
    }

    /// Marks the application as a request sent by a project admin.
    #[must_use]
    pub const fn sent_by_admin(mut self) -> Self {
        self.origin = ApplicationOrigin::Admin;
        self
    }

    /// Returns the project applied to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the applicant.
    #[must_use]
    pub const fn applicant(&self) -> &UserId {
        &self.applicant
    }

    /// Returns the role asked for.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns who opened the application.
    #[must_use]
    pub const fn origin(&self) -> ApplicationOrigin {
        self.origin
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }

    /// Completes the application once the store has assigned an identifier.
    #[must_use]
    pub fn into_application(self, id: ApplicationId) -> Application {
        Application {
            id,
            project_id: self.project_id,
            applicant: self.applicant,
            role: self.role,
            origin: self.origin,
            status: ApplicationStatus::Pending,
            applied_at: self.applied_at,
            updated_at: self.applied_at,
        }
    }
}

/// Application to join a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    id: ApplicationId,
    project_id: ProjectId,
    applicant: UserId,
    role: MemberRole,
    #[serde(rename = "applied")]
    origin: ApplicationOrigin,
    status: ApplicationStatus,
    applied_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Application identifier.
    pub id: ApplicationId,
    /// Project applied to.
    pub project_id: ProjectId,
    /// Applicant.
    pub applicant: UserId,
    /// Role granted on acceptance.
    pub role: MemberRole,
    /// Who opened the application.
    pub origin: ApplicationOrigin,
    /// Status.
    pub status: ApplicationStatus,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            applicant: data.applicant,
            role: data.role,
            origin: data.origin,
            status: data.status,
            applied_at: data.applied_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the project applied to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the applicant.
    #[must_use]
    pub const fn applicant(&self) -> &UserId {
        &self.applicant
    }

    /// Returns the role granted on acceptance.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns who opened the application.
    #[must_use]
    pub const fn origin(&self) -> ApplicationOrigin {
        self.origin
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn applied_at(&self) -> DateTime<Utc> {
        self.applied_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Takes back a pending application.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ApplicationNotPending`] once decided or
    /// withdrawn.
    pub fn withdraw(&mut self, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        self.leave_pending(ApplicationStatus::Withdrawn, clock)
    }

    /// Records a reviewer's decision on a pending application.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::ApplicationNotPending`] once decided or
    /// withdrawn.
    pub fn decide(
        &mut self,
        decision: ApplicationDecision,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let target = match decision {
            ApplicationDecision::Accept => ApplicationStatus::Accepted,
            ApplicationDecision::Reject => ApplicationStatus::Rejected,
        };
        self.leave_pending(target, clock)
    }

    fn leave_pending(
        &mut self,
        target: ApplicationStatus,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        if self.status != ApplicationStatus::Pending {
            return Err(ProjectDomainError::ApplicationNotPending(self.status));
        }
        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
