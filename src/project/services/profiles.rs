//! Service layer for user profiles.

use crate::ids::{InvalidUserId, UserId};
use crate::project::{
    domain::{ProfileUpdate, ProjectDomainError, UserProfile},
    ports::{ProjectRepositoryError, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Identity details captured by a provider sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInProfile {
    external_id: String,
    email: String,
    display_name: Option<String>,
}

impl SignInProfile {
    /// Creates sign-in details; the roll number is the e-mail local part.
    #[must_use]
    pub fn new(external_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            email: email.into(),
            display_name: None,
        }
    }

    /// Sets the display name reported by the provider.
    #[must_use]
    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }
}

/// Request payload for editing one's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    name: Option<String>,
    bio: Option<String>,
}

impl UpdateProfileRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the user.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    fn into_update(self) -> Result<ProfileUpdate, ProjectDomainError> {
        let mut update = ProfileUpdate::default();
        if let Some(name) = self.name {
            update = update.with_name(name)?;
        }
        if let Some(bio) = self.bio {
            update = update.with_bio(bio);
        }
        Ok(update)
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The roll number is malformed.
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),

    /// No profile matches the lookup key.
    #[error("User not found")]
    ProfileNotFound(String),

    /// Directory operation failed.
    #[error(transparent)]
    Directory(#[from] ProjectRepositoryError),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile registration, lookup and self-service editing.
pub struct ProfileService<U, C>
where
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    directory: Arc<U>,
    clock: Arc<C>,
}

impl<U, C> ProfileService<U, C>
where
    U: UserDirectory + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(directory: Arc<U>, clock: Arc<C>) -> Self {
        Self { directory, clock }
    }

    /// Creates or refreshes the profile of a user who just signed in.
    ///
    /// The display name falls back to the roll number; a biography stored
    /// earlier is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::InvalidUser`] when no roll number can
    /// be derived from the e-mail address.
    pub async fn register(&self, sign_in: SignInProfile) -> ProfileServiceResult<UserProfile> {
        let user_id = UserId::from_email(&sign_in.email)?;
        let name = sign_in
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user_id.to_string());
        let fresh = UserProfile::new(
            user_id,
            sign_in.external_id,
            name,
            Some(sign_in.email),
            &*self.clock,
        )?;

        let profile = match self.directory.find_profile(fresh.user_id()).await? {
            Some(previous) => fresh.keeping_bio_of(&previous),
            None => fresh,
        };
        self.directory.save_profile(&profile).await?;
        info!(user_id = %profile.user_id(), "profile registered");
        Ok(profile)
    }

    /// Returns the profile of a roll number.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::ProfileNotFound`] for an unknown user.
    pub async fn profile(&self, user_id: &str) -> ProfileServiceResult<UserProfile> {
        let key = UserId::new(user_id)?;
        self.directory
            .find_profile(&key)
            .await?
            .ok_or_else(|| ProfileServiceError::ProfileNotFound(key.to_string()))
    }

    /// Lists every profile ordered by roll number.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Directory`] when lookup fails.
    pub async fn list_profiles(&self) -> ProfileServiceResult<Vec<UserProfile>> {
        Ok(self.directory.list_profiles().await?)
    }

    /// Edits the profile bound to an authenticated provider subject.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Domain`] when no field is given or the
    /// name is blank and [`ProfileServiceError::ProfileNotFound`] when the
    /// subject never registered.
    pub async fn update_own_profile(
        &self,
        external_id: &str,
        request: UpdateProfileRequest,
    ) -> ProfileServiceResult<UserProfile> {
        let update = request.into_update()?;
        if update.is_empty() {
            return Err(ProjectDomainError::EmptyProfileUpdate.into());
        }

        let mut profile = self
            .directory
            .find_by_external_id(external_id)
            .await?
            .ok_or_else(|| ProfileServiceError::ProfileNotFound(external_id.to_owned()))?;
        profile.apply_update(update, &*self.clock)?;
        self.directory.save_profile(&profile).await?;
        info!(user_id = %profile.user_id(), "profile updated");
        Ok(profile)
    }
}
