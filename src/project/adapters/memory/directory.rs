//! In-memory user directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::ids::UserId;
use crate::project::{
    domain::UserProfile,
    ports::{ProjectRepositoryError, ProjectRepositoryResult, UserDirectory},
};

/// Thread-safe in-memory profile store keyed by roll number.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    profiles: Arc<RwLock<BTreeMap<UserId, UserProfile>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn save_profile(&self, profile: &UserProfile) -> ProjectRepositoryResult<()> {
        let mut profiles = self.profiles.write().map_err(poisoned)?;
        profiles.insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_profile(&self, user_id: &UserId) -> ProjectRepositoryResult<Option<UserProfile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.get(user_id).cloned())
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> ProjectRepositoryResult<Option<UserProfile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles
            .values()
            .find(|profile| profile.external_id() == Some(external_id))
            .cloned())
    }

    async fn list_profiles(&self) -> ProjectRepositoryResult<Vec<UserProfile>> {
        let profiles = self.profiles.read().map_err(poisoned)?;
        Ok(profiles.values().cloned().collect())
    }
}
