//! Error types for project, membership, application and rating rules.

use super::{ApplicationStatus, MemberRole};
use crate::ids::InvalidUserId;
use thiserror::Error;

/// Errors returned while constructing or changing project values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project title is empty after trimming.
    #[error("project title must not be empty")]
    EmptyTitle,

    /// The project description is empty after trimming.
    #[error("project description must not be empty")]
    EmptyDescription,

    /// A user id is malformed.
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),

    /// A rating score is outside `1..=5`.
    #[error("score must be between 1 and 5, got {0}")]
    InvalidScore(i64),

    /// A member tried to rate themselves.
    #[error("You cannot rate yourself")]
    SelfRating,

    /// Only plain members can become moderators.
    #[error("User is a {0} and cannot be promoted to Moderator.")]
    CannotPromote(MemberRole),

    /// Only moderators can be demoted.
    #[error("User is not a moderator or demotion failed.")]
    CannotDemote,

    /// Applications may only ask for the member or mentor role.
    #[error("Cannot request the {0} role")]
    RoleNotRequestable(MemberRole),

    /// The application has already left the pending state.
    #[error("Application is already {0}")]
    ApplicationNotPending(ApplicationStatus),

    /// A profile display name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// A profile update named no field.
    #[error("No fields provided to update")]
    EmptyProfileUpdate,
}

/// Error returned while parsing project statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing member roles.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseMemberRoleError(pub String);

/// Error returned while parsing application origins.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown application origin: {0}")]
pub struct ParseApplicationOriginError(pub String);

/// Error returned while parsing application statuses or decisions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid application status: {0}")]
pub struct ParseApplicationStatusError(pub String);
