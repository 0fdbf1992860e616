//! User directory port for profile persistence.

use super::ProjectRepositoryResult;
use crate::ids::UserId;
use crate::project::domain::UserProfile;
use async_trait::async_trait;

/// Profile persistence contract.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Inserts or replaces the profile keyed by its roll number.
    async fn save_profile(&self, profile: &UserProfile) -> ProjectRepositoryResult<()>;

    /// Finds a profile by roll number.
    async fn find_profile(&self, user_id: &UserId) -> ProjectRepositoryResult<Option<UserProfile>>;

    /// Finds the profile bound to an identity-provider subject id.
    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> ProjectRepositoryResult<Option<UserProfile>>;

    /// Lists all profiles ordered by roll number.
    async fn list_profiles(&self) -> ProjectRepositoryResult<Vec<UserProfile>>;
}
