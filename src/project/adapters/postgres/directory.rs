//! `PostgreSQL` user directory.

use super::{models::UserRow, schema::users};
use crate::ids::UserId;
use crate::persistence::{PgPool, with_connection};
use crate::project::{
    domain::{PersistedProfileData, UserProfile},
    ports::{ProjectRepositoryError, ProjectRepositoryResult, UserDirectory},
};
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed profile store.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn save_profile(&self, profile: &UserProfile) -> ProjectRepositoryResult<()> {
        let row = UserRow {
            user_id: profile.user_id().as_str().to_owned(),
            external_id: profile.external_id().map(str::to_owned),
            name: profile.name().to_owned(),
            email: profile.email().map(str::to_owned),
            bio: profile.bio().map(str::to_owned),
            updated_at: profile.updated_at(),
        };
        with_connection(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::user_id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_profile(&self, user_id: &UserId) -> ProjectRepositoryResult<Option<UserProfile>> {
        let key = user_id.as_str().to_owned();
        with_connection(&self.pool, move |connection| {
            let row = users::table
                .find(key)
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> ProjectRepositoryResult<Option<UserProfile>> {
        let subject = external_id.to_owned();
        with_connection(&self.pool, move |connection| {
            let row = users::table
                .filter(users::external_id.eq(subject))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_profile).transpose()
        })
        .await
    }

    async fn list_profiles(&self) -> ProjectRepositoryResult<Vec<UserProfile>> {
        with_connection(&self.pool, move |connection| {
            users::table
                .order(users::user_id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?
                .into_iter()
                .map(row_to_profile)
                .collect()
        })
        .await
    }
}

fn row_to_profile(row: UserRow) -> ProjectRepositoryResult<UserProfile> {
    let user_id = UserId::new(row.user_id).map_err(ProjectRepositoryError::invalid_persisted_data)?;
    Ok(UserProfile::from_persisted(PersistedProfileData {
        user_id,
        external_id: row.external_id,
        name: row.name,
        email: row.email,
        bio: row.bio,
        updated_at: row.updated_at,
    }))
}
