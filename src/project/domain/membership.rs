//! Project membership and roles.

use super::{ParseMemberRoleError, ProjectDomainError};
use crate::ids::{ProjectId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a user holds within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Created the project.
    Owner,
    /// Member trusted to manage the board.
    Moderator,
    /// Guides the team.
    Mentor,
    /// Regular team member.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Moderator => "moderator",
            Self::Mentor => "mentor",
            Self::Member => "member",
        }
    }

    /// Returns `true` for roles that may invite users on the project's
    /// behalf.
    #[must_use]
    pub const fn can_manage(self) -> bool {
        matches!(self, Self::Owner | Self::Moderator)
    }

    /// Returns `true` for roles an application may ask for.
    #[must_use]
    pub const fn is_requestable(self) -> bool {
        matches!(self, Self::Member | Self::Mentor)
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "moderator" => Ok(Self::Moderator),
            "mentor" => Ok(Self::Mentor),
            "member" => Ok(Self::Member),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's membership of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    project_id: ProjectId,
    user_id: UserId,
    role: MemberRole,
    joined_at: DateTime<Utc>,
}

impl Membership {
    /// Creates a membership starting now.
    #[must_use]
    pub fn new(project_id: ProjectId, user_id: UserId, role: MemberRole, clock: &impl Clock) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        project_id: ProjectId,
        user_id: UserId,
        role: MemberRole,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            user_id,
            role,
            joined_at,
        }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns when the user joined.
    #[must_use]
    pub const fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Makes a plain member a moderator.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CannotPromote`] for any other role.
    pub const fn promote(&mut self) -> Result<(), ProjectDomainError> {
        match self.role {
            MemberRole::Member => {
                self.role = MemberRole::Moderator;
                Ok(())
            }
            other => Err(ProjectDomainError::CannotPromote(other)),
        }
    }

    /// Returns a moderator to plain membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::CannotDemote`] for any other role.
    pub const fn demote(&mut self) -> Result<(), ProjectDomainError> {
        match self.role {
            MemberRole::Moderator => {
                self.role = MemberRole::Member;
                Ok(())
            }
            _ => Err(ProjectDomainError::CannotDemote),
        }
    }
}
