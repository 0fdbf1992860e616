//! Identifiers shared by the project and sprint modules.
//!
//! Projects, sprints, tasks and applications are numbered by the database
//! (`BIGSERIAL`) and exchanged with clients as plain JSON integers, so these
//! identifiers wrap `i64` rather than UUIDs. Users are keyed by their roll
//! number.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when a raw value is not a valid store identifier.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid {kind} id {value}, expected a positive integer")]
pub struct InvalidIdentifier {
    /// Human-readable identifier kind, e.g. `task`.
    pub kind: &'static str,
    /// Rejected raw value.
    pub value: i64,
}

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a validated identifier.
            ///
            /// # Errors
            ///
            /// Returns [`InvalidIdentifier`] when the value is zero or
            /// negative.
            pub const fn new(value: i64) -> Result<Self, InvalidIdentifier> {
                if value <= 0 {
                    return Err(InvalidIdentifier { kind: $kind, value });
                }
                Ok(Self(value))
            }

            /// Returns the underlying numeric value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a project.
    ProjectId,
    "project"
);
numeric_id!(
    /// Identifier of a sprint.
    SprintId,
    "sprint"
);
numeric_id!(
    /// Identifier of a task.
    TaskId,
    "task"
);
numeric_id!(
    /// Identifier of a project application.
    ApplicationId,
    "application"
);

/// Maximum user id length, matching the `VARCHAR(64)` key columns.
const MAX_USER_ID_LENGTH: usize = 64;

/// Error returned when a value is not a usable roll number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid user id '{0}'")]
pub struct InvalidUserId(pub String);

/// Roll number identifying a user in the relational store.
///
/// Roll numbers are the local part of the institutional e-mail address and
/// are compared case-insensitively, so they are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user id.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUserId`] when the value is blank, contains
    /// whitespace or `@`, or exceeds 64 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidUserId> {
        let raw = value.into();
        let normalized = raw.trim();
        let malformed = normalized.is_empty()
            || normalized.len() > MAX_USER_ID_LENGTH
            || normalized
                .chars()
                .any(|ch| ch.is_whitespace() || ch == '@');
        if malformed {
            return Err(InvalidUserId(raw));
        }
        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Derives the roll number from an institutional e-mail address.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUserId`] when the address has no usable local part.
    pub fn from_email(email: &str) -> Result<Self, InvalidUserId> {
        let local = email
            .split_once('@')
            .map_or(email, |(local_part, _)| local_part);
        Self::new(local)
    }

    /// Returns the user id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = InvalidUserId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
