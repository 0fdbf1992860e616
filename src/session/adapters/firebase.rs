//! Firebase Authentication adapter.
//!
//! Verifies ID tokens with the Identity Toolkit `accounts:lookup` endpoint.
//! Google checks the token signature and expiry server-side and answers with
//! the account the token belongs to, so no key material is handled here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::{
    domain::VerifiedIdentity,
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Default Identity Toolkit base URL.
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

/// Identity provider backed by Firebase Authentication.
#[derive(Debug, Clone)]
pub struct FirebaseIdentityProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    display_name: Option<String>,
    email: Option<String>,
}

#[derive(Deserialize, Default)]
struct LookupErrorBody {
    #[serde(default)]
    error: LookupErrorDetail,
}

#[derive(Deserialize, Default)]
struct LookupErrorDetail {
    #[serde(default)]
    message: String,
}

impl FirebaseIdentityProvider {
    /// Creates a provider that shares `client` for every lookup.
    #[must_use]
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn lookup_url(&self) -> String {
        format!("{}/v1/accounts:lookup", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn verify_token(&self, id_token: &str) -> IdentityResult<VerifiedIdentity> {
        let response = self
            .client
            .post(self.lookup_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token })
            .send()
            .await
            .map_err(IdentityError::unavailable)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body = response.json::<LookupErrorBody>().await.unwrap_or_default();
            debug!(reason = %body.error.message, "identity provider rejected token");
            return Err(IdentityError::Rejected(body.error.message));
        }

        let accepted = response.error_for_status().map_err(|err| {
            warn!(%status, "identity provider returned an error status");
            IdentityError::unavailable(err)
        })?;
        let body = accepted
            .json::<LookupResponse>()
            .await
            .map_err(IdentityError::unavailable)?;

        let user = body
            .users
            .into_iter()
            .next()
            .ok_or_else(|| IdentityError::Rejected("USER_NOT_FOUND".to_owned()))?;

        Ok(VerifiedIdentity::new(
            user.local_id,
            user.display_name,
            user.email,
        ))
    }
}
