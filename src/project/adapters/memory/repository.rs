//! In-memory repository for projects and everything attached to them.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::ids::{ApplicationId, ProjectId, UserId};
use crate::project::{
    domain::{
        Application, MemberRating, MemberRole, Membership, NewApplication, NewProject, Project,
        ProjectRating, ProjectStatus, RankedProject, Score, sort_rankings,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
///
/// Clones share state and identifier sequences.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<ProjectState>>,
}

#[derive(Debug, Default)]
struct ProjectState {
    projects: BTreeMap<ProjectId, Project>,
    members: BTreeMap<(ProjectId, UserId), Membership>,
    applications: BTreeMap<ApplicationId, Application>,
    member_ratings: BTreeMap<(ProjectId, UserId, UserId), MemberRating>,
    project_ratings: BTreeMap<(ProjectId, UserId), ProjectRating>,
    last_project_id: i64,
    last_application_id: i64,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes a project's status, for seeding listings in tests.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::ProjectNotFound`] for an unknown
    /// project.
    pub fn set_status(&self, id: ProjectId, status: ProjectStatus) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .projects
            .get_mut(&id)
            .ok_or(ProjectRepositoryError::ProjectNotFound(id))?
            .set_status(status);
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create_project(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = ProjectId::new(state.last_project_id + 1)
            .map_err(ProjectRepositoryError::persistence)?;
        state.last_project_id = id.value();

        let created = project.clone().into_project(id);
        let owner = Membership::from_persisted(
            id,
            created.owner().clone(),
            MemberRole::Owner,
            created.created_at(),
        );
        state.members.insert((id, created.owner().clone()), owner);
        state.projects.insert(id, created.clone());
        Ok(created)
    }

    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .projects
            .values()
            .filter(|project| status.is_none_or(|wanted| project.status() == wanted))
            .cloned()
            .collect())
    }

    async fn list_projects_for_member(
        &self,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .members
            .keys()
            .filter(|(_, member)| member == user_id)
            .filter_map(|(project_id, _)| state.projects.get(project_id).cloned())
            .collect())
    }

    async fn list_members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut members: Vec<Membership> = state
            .members
            .values()
            .filter(|membership| membership.project_id() == project_id)
            .cloned()
            .collect();
        members.sort_by_key(Membership::joined_at);
        Ok(members)
    }

    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Membership>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.members.get(&(project_id, user_id.clone())).cloned())
    }

    async fn save_membership(&self, membership: &Membership) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.members.insert(
            (membership.project_id(), membership.user_id().clone()),
            membership.clone(),
        );
        Ok(())
    }

    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> ProjectRepositoryResult<Application> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.projects.contains_key(&application.project_id()) {
            return Err(ProjectRepositoryError::ProjectNotFound(
                application.project_id(),
            ));
        }
        let id = ApplicationId::new(state.last_application_id + 1)
            .map_err(ProjectRepositoryError::persistence)?;
        state.last_application_id = id.value();

        let created = application.clone().into_application(id);
        state.applications.insert(id, created.clone());
        Ok(created)
    }

    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> ProjectRepositoryResult<Option<Application>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.applications.get(&id).cloned())
    }

    async fn latest_application(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Application>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .applications
            .values()
            .rev()
            .find(|application| {
                application.project_id() == project_id && application.applicant() == user_id
            })
            .cloned())
    }

    async fn list_applications(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<Vec<Application>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .applications
            .values()
            .rev()
            .filter(|application| application.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn save_application(
        &self,
        application: &Application,
        granted: Option<Membership>,
    ) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let slot = state
            .applications
            .get_mut(&application.id())
            .ok_or(ProjectRepositoryError::ApplicationNotFound(application.id()))?;
        *slot = application.clone();
        if let Some(membership) = granted {
            state
                .members
                .insert((membership.project_id(), membership.user_id().clone()), membership);
        }
        Ok(())
    }

    async fn save_member_rating(&self, rating: &MemberRating) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let key = (
            rating.project_id(),
            rating.rated_by().clone(),
            rating.rated_user().clone(),
        );
        state.member_ratings.insert(key, rating.clone());
        Ok(())
    }

    async fn save_project_rating(&self, rating: &ProjectRating) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.projects.contains_key(&rating.project_id()) {
            return Err(ProjectRepositoryError::ProjectNotFound(rating.project_id()));
        }
        state.project_ratings.insert(
            (rating.project_id(), rating.user_id().clone()),
            rating.clone(),
        );
        Ok(())
    }

    async fn project_rankings(&self) -> ProjectRepositoryResult<Vec<RankedProject>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut scores: BTreeMap<ProjectId, Vec<Score>> = BTreeMap::new();
        for ((project_id, _), rating) in &state.project_ratings {
            scores.entry(*project_id).or_default().push(rating.score());
        }

        let mut rankings: Vec<RankedProject> = scores
            .into_iter()
            .filter_map(|(project_id, project_scores)| {
                let project = state.projects.get(&project_id)?.clone();
                RankedProject::from_scores(project, &project_scores)
            })
            .collect();
        sort_rankings(&mut rankings);
        Ok(rankings)
    }
}
