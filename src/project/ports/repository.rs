//! Repository port for projects, membership, applications and ratings.

use crate::ids::{ApplicationId, ProjectId, UserId};
use crate::persistence::PersistenceFailure;
use crate::project::domain::{
    Application, MemberRating, Membership, NewApplication, NewProject, Project, ProjectRating,
    ProjectStatus, RankedProject,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project and records its owner as an `owner` member in
    /// the same write.
    async fn create_project(&self, project: &NewProject) -> ProjectRepositoryResult<Project>;

    /// Finds a project by identifier.
    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Lists projects ordered by identifier, optionally only those in
    /// `status`.
    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Lists the projects `user_id` belongs to in any role.
    async fn list_projects_for_member(
        &self,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Lists the members of a project ordered by join time.
    async fn list_members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<Membership>>;

    /// Finds a user's membership of a project.
    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Membership>>;

    /// Inserts or replaces a membership.
    async fn save_membership(&self, membership: &Membership) -> ProjectRepositoryResult<()>;

    /// Stores a new pending application.
    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> ProjectRepositoryResult<Application>;

    /// Finds an application by identifier.
    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> ProjectRepositoryResult<Option<Application>>;

    /// Finds the most recent application of `user_id` to a project.
    async fn latest_application(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Application>>;

    /// Lists the applications to a project, newest first.
    async fn list_applications(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<Vec<Application>>;

    /// Persists an application's new status together with the membership an
    /// acceptance grants.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ApplicationNotFound`] when the
    /// application does not exist.
    async fn save_application(
        &self,
        application: &Application,
        granted: Option<Membership>,
    ) -> ProjectRepositoryResult<()>;

    /// Inserts or replaces the rating one member gave another.
    async fn save_member_rating(&self, rating: &MemberRating) -> ProjectRepositoryResult<()>;

    /// Inserts or replaces a user's rating of a project.
    async fn save_project_rating(&self, rating: &ProjectRating) -> ProjectRepositoryResult<()>;

    /// Returns every rated project with its average score, best first.
    async fn project_rankings(&self) -> ProjectRepositoryResult<Vec<RankedProject>>;
}

/// Errors returned by project repository and user directory
/// implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The application was not found.
    #[error("application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// A stored row could not be reconstructed into a domain value.
    #[error("invalid persisted project data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a data-quality error from stored rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl PersistenceFailure for ProjectRepositoryError {
    fn from_persistence<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::persistence(err)
    }
}
