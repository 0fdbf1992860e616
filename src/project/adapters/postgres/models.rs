//! Diesel row models for project persistence.

use super::schema::{
    member_ratings, project_applications, project_members, project_ratings, projects, users,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for projects.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Owner roll number.
    pub owner_id: String,
    /// Project status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for projects.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProjectRow {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Owner roll number.
    pub owner_id: String,
    /// Project status.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row for project membership, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = project_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRow {
    /// Project.
    pub project_id: i64,
    /// Member roll number.
    pub user_id: String,
    /// Role.
    pub role: String,
    /// Join timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Query result row for applications.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = project_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ApplicationRow {
    /// Application identifier.
    pub id: i64,
    /// Project applied to.
    pub project_id: i64,
    /// Applicant roll number.
    pub user_id: String,
    /// Application status.
    pub status: String,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Role granted on acceptance.
    pub role: String,
    /// Who opened the application.
    pub origin: String,
}

/// Insert model for applications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = project_applications)]
pub struct NewApplicationRow {
    /// Project applied to.
    pub project_id: i64,
    /// Applicant roll number.
    pub user_id: String,
    /// Application status.
    pub status: String,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Role granted on acceptance.
    pub role: String,
    /// Who opened the application.
    pub origin: String,
}

/// Row for member ratings, used for upserts.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = member_ratings)]
pub struct MemberRatingRow {
    /// Project.
    pub project_id: i64,
    /// Rater roll number.
    pub rated_by: String,
    /// Rated member roll number.
    pub rated_user: String,
    /// Score.
    pub score: i16,
    /// Comment.
    pub comment: String,
    /// Rating timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row for project ratings, used for upserts.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = project_ratings)]
pub struct ProjectRatingRow {
    /// Project.
    pub project_id: i64,
    /// Rater roll number.
    pub user_id: String,
    /// Score.
    pub score: i16,
    /// Comment.
    pub comment: String,
    /// Rating timestamp.
    pub created_at: DateTime<Utc>,
}

/// Result row of the ranking query: a project with its rating aggregate.
#[derive(Debug, Clone, QueryableByName)]
pub struct RankingRow {
    /// Project columns.
    #[diesel(embed)]
    pub project: ProjectRow,
    /// Mean project rating.
    #[diesel(sql_type = diesel::sql_types::Double)]
    pub average_score: f64,
    /// Number of ratings.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub rating_count: i64,
}

/// Row for user profiles, used for reads and upserts.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UserRow {
    /// Roll number.
    pub user_id: String,
    /// Identity-provider subject id.
    pub external_id: Option<String>,
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
}
