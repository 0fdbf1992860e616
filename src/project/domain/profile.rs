//! User profiles kept in the relational store.

use super::ProjectDomainError;
use crate::ids::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    user_id: UserId,
    external_id: Option<String>,
    name: String,
    email: Option<String>,
    bio: Option<String>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Roll number.
    pub user_id: UserId,
    /// Identity-provider subject id, once the user has signed in.
    pub external_id: Option<String>,
    /// Display name.
    pub name: String,
    /// E-mail address.
    pub email: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a profile for a user signing in through the identity
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when `name` is blank.
    pub fn new(
        user_id: UserId,
        external_id: impl Into<String>,
        name: impl Into<String>,
        email: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            user_id,
            external_id: Some(external_id.into()),
            name: non_blank_name(name.into())?,
            email,
            bio: None,
            updated_at: clock.utc(),
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            user_id: data.user_id,
            external_id: data.external_id,
            name: data.name,
            email: data.email,
            bio: data.bio,
            updated_at: data.updated_at,
        }
    }

    /// Returns the roll number.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the identity-provider subject id, if known.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the e-mail address, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the biography, if set.
    #[must_use]
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Carries user-edited fields over from the previously stored profile.
    #[must_use]
    pub fn keeping_bio_of(mut self, previous: &Self) -> Self {
        self.bio.clone_from(&previous.bio);
        self
    }

    /// Applies every field named by `update`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProfileUpdate`] when `update`
    /// names no field.
    pub fn apply_update(&mut self, update: ProfileUpdate, clock: &impl Clock) -> Result<(), ProjectDomainError> {
        if update.is_empty() {
            return Err(ProjectDomainError::EmptyProfileUpdate);
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn non_blank_name(raw: String) -> Result<String, ProjectDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

/// Partial update of a user's own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<String>,
    bio: Option<String>,
}

impl ProfileUpdate {
    /// Renames the user.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] when blank.
    pub fn with_name(mut self, name: impl Into<String>) -> Result<Self, ProjectDomainError> {
        self.name = Some(non_blank_name(name.into())?);
        Ok(self)
    }

    /// Replaces the biography.
    #[must_use]
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into().trim().to_owned());
        self
    }

    /// Returns `true` when the update names no field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.bio.is_none()
    }
}
