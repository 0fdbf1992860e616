//! Handshake, revalidation and logout endpoints.

use crate::http::{ApiError, AppState, cookies::SessionCookies, extract::ApiJson};
use crate::project::services::SignInProfile;
use crate::session::services::HandshakeRequest;
use axum::{Json, body::Bytes, extract::State};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, Deserialize)]
pub(super) struct VerifyUserBody {
    #[serde(rename = "idToken")]
    id_token: String,
    uid: String,
    fingerprint: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct VerifyGoogleBody {
    #[serde(rename = "idToken")]
    id_token: String,
    uid: String,
    fingerprint: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AutoLoginBody {
    #[serde(default)]
    fingerprint: Option<String>,
}

pub(super) async fn verify_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<VerifyUserBody>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let handshake = state
        .sessions
        .handshake(HandshakeRequest::new(body.id_token, body.uid, body.fingerprint))
        .await?;
    let issued = state.cookies.issue(jar, &handshake.record);
    Ok((
        issued,
        Json(json!({ "user_verified": true, "message": "Cookie Set" })),
    ))
}

pub(super) async fn verify_google(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(body): ApiJson<VerifyGoogleBody>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let handshake = state
        .sessions
        .handshake(HandshakeRequest::new(body.id_token, body.uid, body.fingerprint))
        .await?;

    let identity = &handshake.identity;
    let email = body
        .email
        .filter(|email| !email.trim().is_empty())
        .or_else(|| identity.email().map(str::to_owned))
        .ok_or_else(|| ApiError::BadRequest("email is required".to_owned()))?;
    let profile = state
        .profiles
        .register(
            SignInProfile::new(identity.subject(), email)
                .with_display_name(identity.display_name_without_suffix(&state.name_suffix)),
        )
        .await?;
    info!(user_id = %profile.user_id(), "google sign-in completed");

    let issued = state.cookies.issue(jar, &handshake.record);
    Ok((
        issued,
        Json(json!({
            "user_verified": true,
            "message": "Cookie Set",
            "roll_no": profile.user_id(),
            "user_name": profile.name(),
        })),
    ))
}

/// Accepts an optional JSON body whose `fingerprint` takes precedence over
/// the fingerprint cookie.
pub(super) async fn auto_login(
    State(state): State<AppState>,
    SessionCookies { owner, fingerprint }: SessionCookies,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let supplied = if body.is_empty() {
        AutoLoginBody::default()
    } else {
        serde_json::from_slice::<AutoLoginBody>(&body)
            .map_err(|err| ApiError::BadRequest(err.to_string()))?
    };
    let presented = supplied.fingerprint.or(fingerprint);

    let record = state
        .sessions
        .revalidate(owner.as_deref(), presented.as_deref())
        .await?;
    Ok(Json(json!({
        "authenticated": true,
        "uid": record.owner_id().as_str(),
    })))
}

pub(super) async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Value>) {
    (
        state.cookies.clear(jar),
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}
