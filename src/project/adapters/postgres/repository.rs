//! `PostgreSQL` repository for projects, membership, applications and
//! ratings.

use super::{
    models::{
        ApplicationRow, MemberRatingRow, MemberRow, NewApplicationRow, NewProjectRow,
        ProjectRatingRow, ProjectRow, RankingRow,
    },
    schema::{member_ratings, project_applications, project_members, project_ratings, projects},
};
use crate::ids::{ApplicationId, ProjectId, UserId};
use crate::persistence::{PgPool, with_connection};
use crate::project::{
    domain::{
        Application, ApplicationOrigin, ApplicationStatus, MemberRating, MemberRole, Membership,
        NewApplication, NewProject, PersistedApplicationData, PersistedProjectData, Project,
        ProjectRating, ProjectStatus, RankedProject,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const RANKING_QUERY: &str = concat!(
    "SELECT p.id, p.title, p.description, p.owner_id, p.status, p.created_at, ",
    "AVG(r.score)::FLOAT8 AS average_score, COUNT(*) AS rating_count ",
    "FROM projects p JOIN project_ratings r ON r.project_id = p.id ",
    "GROUP BY p.id ",
    "ORDER BY average_score DESC, rating_count DESC, p.id ASC",
);

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn invalid(err: impl std::error::Error + Send + Sync + 'static) -> ProjectRepositoryError {
    ProjectRepositoryError::invalid_persisted_data(err)
}

fn missing_project(project_id: ProjectId) -> impl Fn(DieselError) -> ProjectRepositoryError {
    move |err| match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            ProjectRepositoryError::ProjectNotFound(project_id)
        }
        _ => ProjectRepositoryError::persistence(err),
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create_project(&self, project: &NewProject) -> ProjectRepositoryResult<Project> {
        let row = NewProjectRow {
            title: project.title().to_owned(),
            description: project.description().to_owned(),
            owner_id: project.owner().as_str().to_owned(),
            status: ProjectStatus::Active.as_str().to_owned(),
            created_at: project.created_at(),
        };
        with_connection(&self.pool, move |connection| {
            let inserted = connection
                .transaction::<ProjectRow, DieselError, _>(|tx| {
                    let created = diesel::insert_into(projects::table)
                        .values(&row)
                        .returning(ProjectRow::as_returning())
                        .get_result::<ProjectRow>(tx)?;
                    diesel::insert_into(project_members::table)
                        .values(MemberRow {
                            project_id: created.id,
                            user_id: created.owner_id.clone(),
                            role: MemberRole::Owner.as_str().to_owned(),
                            joined_at: created.created_at,
                        })
                        .execute(tx)?;
                    Ok(created)
                })
                .map_err(ProjectRepositoryError::persistence)?;
            row_to_project(inserted)
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        with_connection(&self.pool, move |connection| {
            let row = projects::table
                .find(id.value())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_projects(
        &self,
        status: Option<ProjectStatus>,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        with_connection(&self.pool, move |connection| {
            let mut query = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .into_boxed();
            if let Some(wanted) = status {
                query = query.filter(projects::status.eq(wanted.as_str()));
            }
            query
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn list_projects_for_member(
        &self,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let member = user_id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            projects::table
                .inner_join(project_members::table)
                .filter(project_members::user_id.eq(member))
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_project)
                .collect()
        })
        .await
    }

    async fn list_members(&self, project_id: ProjectId) -> ProjectRepositoryResult<Vec<Membership>> {
        with_connection(&self.pool, move |connection| {
            project_members::table
                .filter(project_members::project_id.eq(project_id.value()))
                .order((project_members::joined_at.asc(), project_members::user_id.asc()))
                .select(MemberRow::as_select())
                .load::<MemberRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_membership)
                .collect()
        })
        .await
    }

    async fn find_membership(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Membership>> {
        let member = user_id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = project_members::table
                .find((project_id.value(), member))
                .select(MemberRow::as_select())
                .first::<MemberRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_membership).transpose()
        })
        .await
    }

    async fn save_membership(&self, membership: &Membership) -> ProjectRepositoryResult<()> {
        let row = to_member_row(membership);
        let project_id = membership.project_id();
        with_connection(&self.pool, move |connection| {
            upsert_membership(connection, &row).map_err(missing_project(project_id))
        })
        .await
    }

    async fn create_application(
        &self,
        application: &NewApplication,
    ) -> ProjectRepositoryResult<Application> {
        let project_id = application.project_id();
        let row = NewApplicationRow {
            project_id: project_id.value(),
            user_id: application.applicant().as_str().to_owned(),
            status: ApplicationStatus::Pending.as_str().to_owned(),
            applied_at: application.applied_at(),
            updated_at: application.applied_at(),
            role: application.role().as_str().to_owned(),
            origin: application.origin().as_str().to_owned(),
        };
        with_connection(&self.pool, move |connection| {
            let inserted = diesel::insert_into(project_applications::table)
                .values(&row)
                .returning(ApplicationRow::as_returning())
                .get_result::<ApplicationRow>(connection)
                .map_err(missing_project(project_id))?;
            row_to_application(inserted)
        })
        .await
    }

    async fn find_application(
        &self,
        id: ApplicationId,
    ) -> ProjectRepositoryResult<Option<Application>> {
        with_connection(&self.pool, move |connection| {
            let row = project_applications::table
                .find(id.value())
                .select(ApplicationRow::as_select())
                .first::<ApplicationRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_application).transpose()
        })
        .await
    }

    async fn latest_application(
        &self,
        project_id: ProjectId,
        user_id: &UserId,
    ) -> ProjectRepositoryResult<Option<Application>> {
        let applicant = user_id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = project_applications::table
                .filter(project_applications::project_id.eq(project_id.value()))
                .filter(project_applications::user_id.eq(applicant))
                .order(project_applications::id.desc())
                .select(ApplicationRow::as_select())
                .first::<ApplicationRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_application).transpose()
        })
        .await
    }

    async fn list_applications(
        &self,
        project_id: ProjectId,
    ) -> ProjectRepositoryResult<Vec<Application>> {
        with_connection(&self.pool, move |connection| {
            project_applications::table
                .filter(project_applications::project_id.eq(project_id.value()))
                .order(project_applications::id.desc())
                .select(ApplicationRow::as_select())
                .load::<ApplicationRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_application)
                .collect()
        })
        .await
    }

    async fn save_application(
        &self,
        application: &Application,
        granted: Option<Membership>,
    ) -> ProjectRepositoryResult<()> {
        let id = application.id();
        let status = application.status().as_str();
        let updated_at = application.updated_at();
        let member_row = granted.as_ref().map(to_member_row);
        with_connection(&self.pool, move |connection| {
            let updated = connection
                .transaction::<usize, DieselError, _>(|tx| {
                    let updated = diesel::update(project_applications::table.find(id.value()))
                        .set((
                            project_applications::status.eq(status),
                            project_applications::updated_at.eq(updated_at),
                        ))
                        .execute(tx)?;
                    if updated > 0
                        && let Some(row) = &member_row
                    {
                        upsert_membership(tx, row)?;
                    }
                    Ok(updated)
                })
                .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::ApplicationNotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn save_member_rating(&self, rating: &MemberRating) -> ProjectRepositoryResult<()> {
        let project_id = rating.project_id();
        let row = MemberRatingRow {
            project_id: project_id.value(),
            rated_by: rating.rated_by().as_str().to_owned(),
            rated_user: rating.rated_user().as_str().to_owned(),
            score: i16::from(rating.score().value()),
            comment: rating.comment().to_owned(),
            created_at: rating.created_at(),
        };
        with_connection(&self.pool, move |connection| {
            diesel::insert_into(member_ratings::table)
                .values(&row)
                .on_conflict((
                    member_ratings::project_id,
                    member_ratings::rated_by,
                    member_ratings::rated_user,
                ))
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(missing_project(project_id))?;
            Ok(())
        })
        .await
    }

    async fn save_project_rating(&self, rating: &ProjectRating) -> ProjectRepositoryResult<()> {
        let project_id = rating.project_id();
        let row = ProjectRatingRow {
            project_id: project_id.value(),
            user_id: rating.user_id().as_str().to_owned(),
            score: i16::from(rating.score().value()),
            comment: rating.comment().to_owned(),
            created_at: rating.created_at(),
        };
        with_connection(&self.pool, move |connection| {
            diesel::insert_into(project_ratings::table)
                .values(&row)
                .on_conflict((project_ratings::project_id, project_ratings::user_id))
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(missing_project(project_id))?;
            Ok(())
        })
        .await
    }

    async fn project_rankings(&self) -> ProjectRepositoryResult<Vec<RankedProject>> {
        with_connection(&self.pool, move |connection| {
            diesel::sql_query(RANKING_QUERY)
                .load::<RankingRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_ranking)
                .collect()
        })
        .await
    }
}

fn upsert_membership(connection: &mut PgConnection, row: &MemberRow) -> Result<(), DieselError> {
    diesel::insert_into(project_members::table)
        .values(row)
        .on_conflict((project_members::project_id, project_members::user_id))
        .do_update()
        .set(project_members::role.eq(&row.role))
        .execute(connection)?;
    Ok(())
}

fn to_member_row(membership: &Membership) -> MemberRow {
    MemberRow {
        project_id: membership.project_id().value(),
        user_id: membership.user_id().as_str().to_owned(),
        role: membership.role().as_str().to_owned(),
        joined_at: membership.joined_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let data = PersistedProjectData {
        id: ProjectId::new(row.id).map_err(invalid)?,
        title: row.title,
        description: row.description,
        owner: UserId::new(row.owner_id).map_err(invalid)?,
        status: ProjectStatus::try_from(row.status.as_str()).map_err(invalid)?,
        created_at: row.created_at,
    };
    Ok(Project::from_persisted(data))
}

fn row_to_membership(row: MemberRow) -> ProjectRepositoryResult<Membership> {
    Ok(Membership::from_persisted(
        ProjectId::new(row.project_id).map_err(invalid)?,
        UserId::new(row.user_id).map_err(invalid)?,
        MemberRole::try_from(row.role.as_str()).map_err(invalid)?,
        row.joined_at,
    ))
}

fn row_to_application(row: ApplicationRow) -> ProjectRepositoryResult<Application> {
    let data = PersistedApplicationData {
        id: ApplicationId::new(row.id).map_err(invalid)?,
        project_id: ProjectId::new(row.project_id).map_err(invalid)?,
        applicant: UserId::new(row.user_id).map_err(invalid)?,
        role: MemberRole::try_from(row.role.as_str()).map_err(invalid)?,
        origin: ApplicationOrigin::try_from(row.origin.as_str()).map_err(invalid)?,
        status: ApplicationStatus::try_from(row.status.as_str()).map_err(invalid)?,
        applied_at: row.applied_at,
        updated_at: row.updated_at,
    };
    Ok(Application::from_persisted(data))
}

fn row_to_ranking(row: RankingRow) -> ProjectRepositoryResult<RankedProject> {
    Ok(RankedProject {
        project: row_to_project(row.project)?,
        average_score: row.average_score,
        rating_count: u32::try_from(row.rating_count).map_err(invalid)?,
    })
}
