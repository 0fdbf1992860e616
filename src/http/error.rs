//! HTTP error type and the mapping from service errors to status codes.

use crate::ids::{InvalidIdentifier, InvalidUserId};
use crate::project::services::{ProfileServiceError, ProjectServiceError};
use crate::session::services::SessionServiceError;
use crate::sprint::services::SprintBoardServiceError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by every handler and by the session gate.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is malformed or breaks a validation rule.
    #[error("{0}")]
    BadRequest(String),

    /// The caller could not be authenticated.
    #[error("{0}")]
    Unauthorized(String),

    /// Session cookies were presented but no fresh record admits them.
    #[error("Session expired")]
    SessionExpired,

    /// The caller may not perform the operation.
    #[error("{0}")]
    Forbidden(String),

    /// A referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A downstream dependency failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Rejection used by the session gate.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_owned())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn bad_request(err: &impl std::error::Error) -> Self {
        Self::BadRequest(err.to_string())
    }

    fn internal(err: &impl std::error::Error) -> Self {
        error!(error = %err, "request failed downstream");
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::SessionExpired => json!({ "authenticated": false, "message": "Session expired" }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(reason = %rejection.body_text(), "malformed JSON body");
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<InvalidIdentifier> for ApiError {
    fn from(err: InvalidIdentifier) -> Self {
        Self::bad_request(&err)
    }
}

impl From<InvalidUserId> for ApiError {
    fn from(err: InvalidUserId) -> Self {
        Self::bad_request(&err)
    }
}

impl From<SessionServiceError> for ApiError {
    fn from(err: SessionServiceError) -> Self {
        match err {
            SessionServiceError::Domain(_) => Self::bad_request(&err),
            SessionServiceError::Identity(_) | SessionServiceError::SubjectMismatch => {
                Self::Unauthorized(err.to_string())
            }
            SessionServiceError::SessionExpired => Self::SessionExpired,
            SessionServiceError::Store(_) => Self::internal(&err),
        }
    }
}

impl From<SprintBoardServiceError> for ApiError {
    fn from(err: SprintBoardServiceError) -> Self {
        use crate::sprint::ports::SprintBoardRepositoryError as Repo;
        match err {
            SprintBoardServiceError::Domain(_)
            | SprintBoardServiceError::InvalidUser(_)
            | SprintBoardServiceError::InvalidStatus(_)
            | SprintBoardServiceError::LabelMismatch { .. }
            | SprintBoardServiceError::InvalidSprintStatus(_) => Self::bad_request(&err),
            SprintBoardServiceError::SprintNotFound(_)
            | SprintBoardServiceError::SprintNumberNotFound { .. }
            | SprintBoardServiceError::TaskNotFound(_)
            | SprintBoardServiceError::NoSprints(_)
            | SprintBoardServiceError::Repository(Repo::SprintNotFound(_) | Repo::TaskNotFound(_)) => {
                Self::NotFound(err.to_string())
            }
            SprintBoardServiceError::Repository(_) => Self::internal(&err),
        }
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Domain(_)
            | ProjectServiceError::InvalidUser(_)
            | ProjectServiceError::InvalidDecision(_)
            | ProjectServiceError::InvalidRole(_)
            | ProjectServiceError::NotAnAdminRequest(_)
            | ProjectServiceError::AnsweredByInvitee(_)
            | ProjectServiceError::AlreadyMember(_)
            | ProjectServiceError::AlreadyApplied(_) => Self::bad_request(&err),
            ProjectServiceError::ProjectNotFound(_)
            | ProjectServiceError::ApplicationNotFound(_)
            | ProjectServiceError::NoApplication { .. }
            | ProjectServiceError::NoMentorApplication { .. }
            | ProjectServiceError::NotAMember { .. }
            | ProjectServiceError::NoEligibleMembers(_) => Self::NotFound(err.to_string()),
            ProjectServiceError::RatingOutsideTeam(_)
            | ProjectServiceError::MemberCannotRateProject(_)
            | ProjectServiceError::NotProjectAdmin { .. }
            | ProjectServiceError::NotTheInvitee(_) => Self::Forbidden(err.to_string()),
            ProjectServiceError::Repository(_) => Self::internal(&err),
        }
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(err: ProfileServiceError) -> Self {
        match err {
            ProfileServiceError::Domain(_) | ProfileServiceError::InvalidUser(_) => {
                Self::bad_request(&err)
            }
            ProfileServiceError::ProfileNotFound(_) => Self::NotFound(err.to_string()),
            ProfileServiceError::Directory(_) => Self::internal(&err),
        }
    }
}
