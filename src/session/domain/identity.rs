//! Identity asserted by the external provider.

use serde::{Deserialize, Serialize};

/// Decoded result of a successful token verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    subject: String,
    display_name: Option<String>,
    email: Option<String>,
}

impl VerifiedIdentity {
    /// Creates an identity from provider claims.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name,
            email,
        }
    }

    /// Returns the provider subject id embedded in the token.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the provider display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the verified e-mail address, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the display name with an institutional `suffix` removed.
    ///
    /// Institutional accounts append a marker such as `-IIITK` to every
    /// display name; it is dropped before the name is shown or stored.
    #[must_use]
    pub fn display_name_without_suffix(&self, suffix: &str) -> Option<String> {
        let name = self.display_name.as_deref()?;
        if suffix.is_empty() {
            return Some(name.trim().to_owned());
        }
        Some(name.replace(suffix, "").trim().to_owned())
    }
}
