//! Token table identity provider for tests.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::session::{
    domain::VerifiedIdentity,
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Identity provider that answers from a fixed token table.
///
/// Unknown tokens are rejected the way the real provider rejects forged or
/// expired ones.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, VerifiedIdentity>,
}

impl StaticIdentityProvider {
    /// Creates a provider that rejects every token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as asserting `identity`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, identity: VerifiedIdentity) -> Self {
        self.tokens.insert(token.into(), identity);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify_token(&self, id_token: &str) -> IdentityResult<VerifiedIdentity> {
        self.tokens
            .get(id_token)
            .cloned()
            .ok_or_else(|| IdentityError::Rejected("INVALID_ID_TOKEN".to_owned()))
    }
}
