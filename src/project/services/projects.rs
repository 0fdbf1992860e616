//! Service layer for projects, membership, applications and ratings.

use crate::ids::{ApplicationId, InvalidUserId, ProjectId, UserId};
use crate::project::{
    domain::{
        Application, ApplicationDecision, ApplicationOrigin, MemberRating, MemberRole, Membership,
        NewApplication, NewProject, ParseApplicationStatusError, ParseMemberRoleError, Project,
        ProjectDomainError, ProjectRating, ProjectStatus, RankedProject, Score,
    },
    ports::{ProjectRepository, ProjectRepositoryError, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Which projects a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    /// Every project.
    All,
    /// Active projects.
    Current,
    /// Completed projects.
    Past,
}

impl ProjectFilter {
    const fn status(self) -> Option<ProjectStatus> {
        match self {
            Self::All => None,
            Self::Current => Some(ProjectStatus::Active),
            Self::Past => Some(ProjectStatus::Completed),
        }
    }
}

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProjectRequest {
    title: String,
    description: String,
    owner: String,
}

impl AddProjectRequest {
    /// Creates a request for a project owned by `owner`.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            owner: owner.into(),
        }
    }
}

/// Request payload for rating a teammate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateMemberRequest {
    project_id: ProjectId,
    rated_by: String,
    rated_user: String,
    score: i64,
    comment: String,
}

impl RateMemberRequest {
    /// Creates a request with an empty comment.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        rated_by: impl Into<String>,
        rated_user: impl Into<String>,
        score: i64,
    ) -> Self {
        Self {
            project_id,
            rated_by: rated_by.into(),
            rated_user: rated_user.into(),
            score,
            comment: String::new(),
        }
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Request payload for rating a project from outside its team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateProjectRequest {
    project_id: ProjectId,
    user_id: String,
    score: i64,
    comment: String,
}

impl RateProjectRequest {
    /// Creates a request with an empty comment.
    #[must_use]
    pub fn new(project_id: ProjectId, user_id: impl Into<String>, score: i64) -> Self {
        Self {
            project_id,
            user_id: user_id.into(),
            score,
            comment: String::new(),
        }
    }

    /// Attaches a comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Request payload for a project admin inviting a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRequest {
    project_id: ProjectId,
    admin_id: String,
    user_id: String,
    role: String,
}

impl AdminRequest {
    /// Creates an invitation to plain membership.
    #[must_use]
    pub fn new(project_id: ProjectId, admin_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            project_id,
            admin_id: admin_id.into(),
            user_id: user_id.into(),
            role: MemberRole::Member.as_str().to_owned(),
        }
    }

    /// Invites the user to `role` instead.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// A project with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// The project.
    pub project: Project,
    /// Members ordered by join time.
    pub members: Vec<Membership>,
}

/// A member listed with their display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMember {
    /// Roll number.
    pub user_id: UserId,
    /// Display name, or the roll number when no profile exists.
    pub name: String,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// A user id in the request is malformed.
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),

    /// A decision is neither `accepted` nor `rejected`.
    #[error(transparent)]
    InvalidDecision(#[from] ParseApplicationStatusError),

    /// A requested role is unknown.
    #[error(transparent)]
    InvalidRole(#[from] ParseMemberRoleError),

    /// The project does not exist.
    #[error("Project not found")]
    ProjectNotFound(ProjectId),

    /// The application does not exist.
    #[error("Application not found")]
    ApplicationNotFound(ApplicationId),

    /// The user never applied to the project.
    #[error("No application found for user {user_id} in project {project_id}")]
    NoApplication {
        /// Project searched.
        project_id: ProjectId,
        /// Applicant searched.
        user_id: UserId,
    },

    /// The applicant already belongs to the project.
    #[error("User is already a member of this project")]
    AlreadyMember(UserId),

    /// The applicant already has a pending application.
    #[error("Application already pending")]
    AlreadyApplied(UserId),

    /// The user's latest application is not a mentor application.
    #[error("No mentor application found for user {user_id} in project {project_id}")]
    NoMentorApplication {
        /// Project searched.
        project_id: ProjectId,
        /// Applicant searched.
        user_id: UserId,
    },

    /// Only owners and moderators may invite users.
    #[error("User {user_id} is not an admin of project {project_id}")]
    NotProjectAdmin {
        /// Project named in the request.
        project_id: ProjectId,
        /// User who tried to invite.
        user_id: UserId,
    },

    /// The application was filed by the user, not sent by an admin.
    #[error("Application {0} is not an admin request")]
    NotAnAdminRequest(ApplicationId),

    /// Admin requests are answered by the invited user, not by reviewers.
    #[error("Application {0} is an admin request and can only be answered by the invited user")]
    AnsweredByInvitee(ApplicationId),

    /// Someone other than the invited user answered an admin request.
    #[error("Request {0} was sent to another user")]
    NotTheInvitee(ApplicationId),

    /// The user is not a member of the project.
    #[error("User {user_id} is not a member of project {project_id}")]
    NotAMember {
        /// Project searched.
        project_id: ProjectId,
        /// User searched.
        user_id: UserId,
    },

    /// A member rating involves someone outside the team.
    #[error("Both users must be members of the project")]
    RatingOutsideTeam(ProjectId),

    /// Team members may not rate their own project.
    #[error("You are a team member and cannot rate this project.")]
    MemberCannotRateProject(ProjectId),

    /// No plain member is left to promote.
    #[error("No eligible users found")]
    NoEligibleMembers(ProjectId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),
}

impl From<ProjectRepositoryError> for ProjectServiceError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            ProjectRepositoryError::ApplicationNotFound(id) => Self::ApplicationNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project, membership, application and rating service.
pub struct ProjectService<R, U, C>
where
    R: ProjectRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<U>,
    clock: Arc<C>,
}

impl<R, U, C> ProjectService<R, U, C>
where
    R: ProjectRepository + ?Sized,
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(repository: Arc<R>, directory: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
        }
    }

    /// Creates an active project owned by the requester.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for blank text and
    /// [`ProjectServiceError::InvalidUser`] for a malformed owner.
    pub async fn add_project(&self, request: AddProjectRequest) -> ProjectServiceResult<Project> {
        let owner = UserId::new(request.owner)?;
        let new_project = NewProject::new(request.title, request.description, owner, &*self.clock)?;
        let project = self.repository.create_project(&new_project).await?;
        info!(project_id = %project.id(), owner = %project.owner(), "project created");
        Ok(project)
    }

    /// Returns a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for a missing project.
    pub async fn project(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.require_project(project_id).await
    }

    /// Returns a project with its members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for a missing project.
    pub async fn project_details(&self, project_id: ProjectId) -> ProjectServiceResult<ProjectDetails> {
        let project = self.require_project(project_id).await?;
        let members = self.repository.list_members(project_id).await?;
        Ok(ProjectDetails { project, members })
    }

    /// Lists projects matching `filter` ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn list_projects(&self, filter: ProjectFilter) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.repository.list_projects(filter.status()).await?)
    }

    /// Lists the projects a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidUser`] for a malformed user id.
    pub async fn list_user_projects(&self, user_id: &str) -> ProjectServiceResult<Vec<Project>> {
        let member = UserId::new(user_id)?;
        Ok(self.repository.list_projects_for_member(&member).await?)
    }

    /// Returns the user's membership of a project, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidUser`] for a malformed user id.
    pub async fn verify_member(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Option<Membership>> {
        let member = UserId::new(user_id)?;
        Ok(self.repository.find_membership(project_id, &member).await?)
    }

    /// Files a pending application to join a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for a missing project,
    /// [`ProjectServiceError::AlreadyMember`] for a current member, and
    /// [`ProjectServiceError::AlreadyApplied`] while an earlier application
    /// is still pending.
    pub async fn apply(&self, project_id: ProjectId, user_id: &str) -> ProjectServiceResult<Application> {
        let applicant = UserId::new(user_id)?;
        let new_application = NewApplication::new(project_id, applicant, &*self.clock);
        self.file_application(new_application).await
    }

    /// Files a pending application to mentor a project.
    ///
    /// # Errors
    ///
    /// Fails like [`Self::apply`].
    pub async fn apply_as_mentor(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let applicant = UserId::new(user_id)?;
        let new_application =
            NewApplication::new(project_id, applicant, &*self.clock).requesting(MemberRole::Mentor)?;
        self.file_application(new_application).await
    }

    /// Sends a pending request from a project admin to a user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidRole`] for an unknown role,
    /// [`ProjectServiceError::Domain`] for a role that cannot be requested,
    /// [`ProjectServiceError::NotProjectAdmin`] unless the sender owns or
    /// moderates the project, and fails like [`Self::apply`] for the invited
    /// user.
    pub async fn send_admin_request(&self, request: AdminRequest) -> ProjectServiceResult<Application> {
        let role = MemberRole::try_from(request.role.as_str())?;
        let admin = UserId::new(request.admin_id)?;
        let invitee = UserId::new(request.user_id)?;
        let new_application = NewApplication::new(request.project_id, invitee, &*self.clock)
            .requesting(role)?
            .sent_by_admin();

        self.require_project(request.project_id).await?;
        let admin_role = self
            .repository
            .find_membership(request.project_id, &admin)
            .await?
            .map(|membership| membership.role());
        if !admin_role.is_some_and(MemberRole::can_manage) {
            debug!(project_id = %request.project_id, user_id = %admin, "request from non-admin");
            return Err(ProjectServiceError::NotProjectAdmin {
                project_id: request.project_id,
                user_id: admin,
            });
        }
        self.file_application(new_application).await
    }

    /// Returns the user's latest application to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NoApplication`] when the user never
    /// applied.
    pub async fn application_status(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let applicant = UserId::new(user_id)?;
        self.latest_application_or_error(project_id, applicant).await
    }

    /// Takes back the user's pending application.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NoApplication`] when the user never
    /// applied and [`ProjectServiceError::Domain`] when the latest
    /// application is no longer pending.
    pub async fn withdraw_application(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let applicant = UserId::new(user_id)?;
        let mut application = self.latest_application_or_error(project_id, applicant).await?;
        application.withdraw(&*self.clock)?;
        self.repository.save_application(&application, None).await?;
        info!(application_id = %application.id(), "application withdrawn");
        Ok(application)
    }

    /// Takes back the user's pending mentor application.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NoMentorApplication`] unless the user's
    /// latest application asks for the mentor role, and
    /// [`ProjectServiceError::Domain`] when it is no longer pending.
    pub async fn withdraw_mentor_application(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let mut application = self.latest_mentor_application(project_id, user_id).await?;
        application.withdraw(&*self.clock)?;
        self.repository.save_application(&application, None).await?;
        info!(application_id = %application.id(), "mentor application withdrawn");
        Ok(application)
    }

    /// Accepts the user's pending mentor application and makes them a
    /// mentor of the project in the same write.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NoMentorApplication`] unless the user's
    /// latest application asks for the mentor role,
    /// [`ProjectServiceError::AnsweredByInvitee`] when an admin sent it, and
    /// [`ProjectServiceError::Domain`] when it is no longer pending.
    pub async fn accept_mentor(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let application = self.latest_mentor_application(project_id, user_id).await?;
        if application.origin() == ApplicationOrigin::Admin {
            return Err(ProjectServiceError::AnsweredByInvitee(application.id()));
        }
        self.accept(application).await
    }

    /// Lists the mentors of a project with their display names.
    ///
    /// An empty list is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for a missing project.
    pub async fn list_mentors(&self, project_id: ProjectId) -> ProjectServiceResult<Vec<NamedMember>> {
        self.require_project(project_id).await?;
        self.named_members(project_id, MemberRole::Mentor).await
    }

    /// Accepts an admin request on behalf of the invited user, granting the
    /// role it names.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ApplicationNotFound`] for a missing
    /// request, [`ProjectServiceError::NotAnAdminRequest`] for a user's own
    /// application, [`ProjectServiceError::NotTheInvitee`] when `user_id` is
    /// not the invited user, and [`ProjectServiceError::Domain`] once the
    /// request has been answered.
    pub async fn accept_admin_request(
        &self,
        application_id: ApplicationId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let invitee = UserId::new(user_id)?;
        let application = self.application_or_error(application_id).await?;
        if application.origin() != ApplicationOrigin::Admin {
            return Err(ProjectServiceError::NotAnAdminRequest(application_id));
        }
        if application.applicant() != &invitee {
            return Err(ProjectServiceError::NotTheInvitee(application_id));
        }
        self.accept(application).await
    }

    /// Lists applications to a project, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::ProjectNotFound`] for a missing project.
    pub async fn list_applications(&self, project_id: ProjectId) -> ProjectServiceResult<Vec<Application>> {
        self.require_project(project_id).await?;
        Ok(self.repository.list_applications(project_id).await?)
    }

    /// Accepts or rejects a pending application filed by a user.
    ///
    /// Acceptance grants the role the application asked for in the same
    /// write.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::InvalidDecision`] for an unknown
    /// decision, [`ProjectServiceError::ApplicationNotFound`] for a missing
    /// application, [`ProjectServiceError::AnsweredByInvitee`] for an admin
    /// request, and [`ProjectServiceError::Domain`] when it is no longer
    /// pending.
    pub async fn decide_application(
        &self,
        application_id: ApplicationId,
        decision: &str,
    ) -> ProjectServiceResult<Application> {
        let outcome = ApplicationDecision::try_from(decision)?;
        let mut application = self.application_or_error(application_id).await?;
        if application.origin() == ApplicationOrigin::Admin {
            return Err(ProjectServiceError::AnsweredByInvitee(application_id));
        }

        match outcome {
            ApplicationDecision::Accept => self.accept(application).await,
            ApplicationDecision::Reject => {
                application.decide(outcome, &*self.clock)?;
                self.repository.save_application(&application, None).await?;
                info!(application_id = %application_id, "application rejected");
                Ok(application)
            }
        }
    }

    /// Lists plain members who could be promoted, with their display names.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NoEligibleMembers`] when there are
    /// none.
    pub async fn eligible_moderators(
        &self,
        project_id: ProjectId,
    ) -> ProjectServiceResult<Vec<NamedMember>> {
        let eligible = self.named_members(project_id, MemberRole::Member).await?;
        if eligible.is_empty() {
            return Err(ProjectServiceError::NoEligibleMembers(project_id));
        }
        Ok(eligible)
    }

    /// Makes a plain member a moderator.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotAMember`] when the user is not in
    /// the project and [`ProjectServiceError::Domain`] for any role other
    /// than `member`.
    pub async fn promote(&self, project_id: ProjectId, user_id: &str) -> ProjectServiceResult<Membership> {
        let mut membership = self.membership_or_error(project_id, user_id).await?;
        membership.promote()?;
        self.repository.save_membership(&membership).await?;
        info!(project_id = %project_id, user_id = %membership.user_id(), "member promoted");
        Ok(membership)
    }

    /// Returns a moderator to plain membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotAMember`] when the user is not in
    /// the project and [`ProjectServiceError::Domain`] for any role other
    /// than `moderator`.
    pub async fn demote(&self, project_id: ProjectId, user_id: &str) -> ProjectServiceResult<Membership> {
        let mut membership = self.membership_or_error(project_id, user_id).await?;
        membership.demote()?;
        self.repository.save_membership(&membership).await?;
        info!(project_id = %project_id, user_id = %membership.user_id(), "moderator demoted");
        Ok(membership)
    }

    /// Records one member's rating of a teammate, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for an out-of-range score or a
    /// self-rating, [`ProjectServiceError::ProjectNotFound`] for a missing
    /// project, and [`ProjectServiceError::RatingOutsideTeam`] unless both
    /// users are members.
    pub async fn rate_member(&self, request: RateMemberRequest) -> ProjectServiceResult<MemberRating> {
        let score = Score::new(request.score)?;
        let rated_by = UserId::new(request.rated_by)?;
        let rated_user = UserId::new(request.rated_user)?;
        let rating = MemberRating::new(
            request.project_id,
            rated_by,
            rated_user,
            score,
            request.comment,
            &*self.clock,
        )?;

        self.require_project(request.project_id).await?;
        for user in [rating.rated_by(), rating.rated_user()] {
            if self
                .repository
                .find_membership(request.project_id, user)
                .await?
                .is_none()
            {
                debug!(project_id = %request.project_id, user_id = %user, "rating party outside team");
                return Err(ProjectServiceError::RatingOutsideTeam(request.project_id));
            }
        }

        self.repository.save_member_rating(&rating).await?;
        info!(project_id = %request.project_id, rated_user = %rating.rated_user(), "member rated");
        Ok(rating)
    }

    /// Records an outsider's rating of a project, replacing any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Domain`] for an out-of-range score,
    /// [`ProjectServiceError::ProjectNotFound`] for a missing project, and
    /// [`ProjectServiceError::MemberCannotRateProject`] when the rater is a
    /// member.
    pub async fn rate_project(&self, request: RateProjectRequest) -> ProjectServiceResult<ProjectRating> {
        let score = Score::new(request.score)?;
        let rater = UserId::new(request.user_id)?;
        self.require_project(request.project_id).await?;

        if self
            .repository
            .find_membership(request.project_id, &rater)
            .await?
            .is_some()
        {
            return Err(ProjectServiceError::MemberCannotRateProject(request.project_id));
        }

        let rating = ProjectRating::new(request.project_id, rater, score, request.comment, &*self.clock);
        self.repository.save_project_rating(&rating).await?;
        info!(project_id = %request.project_id, "project rated");
        Ok(rating)
    }

    /// Returns rated projects best first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when lookup fails.
    pub async fn best_projects(&self) -> ProjectServiceResult<Vec<RankedProject>> {
        Ok(self.repository.project_rankings().await?)
    }

    async fn file_application(&self, new_application: NewApplication) -> ProjectServiceResult<Application> {
        let project_id = new_application.project_id();
        let applicant = new_application.applicant().clone();
        self.require_project(project_id).await?;

        if self
            .repository
            .find_membership(project_id, &applicant)
            .await?
            .is_some()
        {
            return Err(ProjectServiceError::AlreadyMember(applicant));
        }
        let latest = self.repository.latest_application(project_id, &applicant).await?;
        if latest.is_some_and(|application| application.status().is_pending()) {
            return Err(ProjectServiceError::AlreadyApplied(applicant));
        }

        let application = self.repository.create_application(&new_application).await?;
        info!(
            application_id = %application.id(),
            project_id = %project_id,
            applicant = %application.applicant(),
            role = application.role().as_str(),
            origin = application.origin().as_str(),
            "application filed"
        );
        Ok(application)
    }

    async fn accept(&self, mut application: Application) -> ProjectServiceResult<Application> {
        application.decide(ApplicationDecision::Accept, &*self.clock)?;
        let granted = Membership::new(
            application.project_id(),
            application.applicant().clone(),
            application.role(),
            &*self.clock,
        );
        self.repository
            .save_application(&application, Some(granted))
            .await?;
        info!(
            application_id = %application.id(),
            role = application.role().as_str(),
            "application accepted"
        );
        Ok(application)
    }

    async fn named_members(
        &self,
        project_id: ProjectId,
        role: MemberRole,
    ) -> ProjectServiceResult<Vec<NamedMember>> {
        let mut named = Vec::new();
        for membership in self.repository.list_members(project_id).await? {
            if membership.role() != role {
                continue;
            }
            let name = self
                .directory
                .find_profile(membership.user_id())
                .await?
                .map_or_else(
                    || membership.user_id().to_string(),
                    |profile| profile.name().to_owned(),
                );
            named.push(NamedMember {
                user_id: membership.user_id().clone(),
                name,
            });
        }
        Ok(named)
    }

    async fn application_or_error(&self, application_id: ApplicationId) -> ProjectServiceResult<Application> {
        self.repository
            .find_application(application_id)
            .await?
            .ok_or(ProjectServiceError::ApplicationNotFound(application_id))
    }

    async fn latest_mentor_application(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Application> {
        let applicant = UserId::new(user_id)?;
        let latest = self
            .repository
            .latest_application(project_id, &applicant)
            .await?;
        latest
            .filter(|application| application.role() == MemberRole::Mentor)
            .ok_or(ProjectServiceError::NoMentorApplication {
                project_id,
                user_id: applicant,
            })
    }

    async fn require_project(&self, project_id: ProjectId) -> ProjectServiceResult<Project> {
        self.repository
            .find_project(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))
    }

    async fn latest_application_or_error(
        &self,
        project_id: ProjectId,
        applicant: UserId,
    ) -> ProjectServiceResult<Application> {
        let latest = self
            .repository
            .latest_application(project_id, &applicant)
            .await?;
        latest.ok_or(ProjectServiceError::NoApplication {
            project_id,
            user_id: applicant,
        })
    }

    async fn membership_or_error(
        &self,
        project_id: ProjectId,
        user_id: &str,
    ) -> ProjectServiceResult<Membership> {
        let member = UserId::new(user_id)?;
        let membership = self.repository.find_membership(project_id, &member).await?;
        membership.ok_or(ProjectServiceError::NotAMember {
            project_id,
            user_id: member,
        })
    }
}
